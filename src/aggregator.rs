//! Series aggregation for the hourly chart
//!
//! Turns raw price rows plus the current selection into the annotated series
//! the hourly chart draws:
//!
//! - **Single mode**: the rows of one day, sorted by hour
//! - **Range mode**: for each hour 1..=24, the mean price over the selected
//!   days that have that hour; hours no day has are left out
//!
//! # Example
//!
//! ```rust
//! use pun_dashboard::aggregator::{available_dates, range_series};
//! use pun_dashboard::{DateRange, PriceRow};
//!
//! let rows = vec![
//!     PriceRow::new("20250917", 8, 129.22),
//!     PriceRow::new("20250918", 8, 135.0),
//! ];
//! let dates = available_dates(&rows);
//!
//! let series = range_series(&rows, &dates, &DateRange::new("20250917", "20250918"));
//! assert_eq!(series.len(), 1);
//! assert_eq!(series[0].sample_count, Some(2));
//! assert!((series[0].price - 132.11).abs() < 1e-9);
//! ```

use std::collections::{BTreeSet, HashMap};

use crate::tariff::classify_hour;
use crate::transformations::{format_date_long, hour_label};
use crate::types::{AnnotatedRow, DateRange, PriceRow, ViewMode};

/// Hours of a market day
pub const HOURS: std::ops::RangeInclusive<u8> = 1..=24;

/// Distinct dates present in the rows, ascending
pub fn available_dates(rows: &[PriceRow]) -> Vec<String> {
    rows.iter()
        .map(|row| row.date.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Attach tariff band and labels to a single-day row
pub fn annotate_row(row: &PriceRow) -> AnnotatedRow {
    let band = classify_hour(row.hour);
    AnnotatedRow {
        date: Some(row.date.clone()),
        formatted_date: Some(format_date_long(&row.date)),
        hour: row.hour,
        hour_label: hour_label(row.hour),
        price: row.price,
        band,
        band_name: band.display_name(),
        band_color: band.color(),
        sample_count: None,
    }
}

/// Build an averaged row for range views
fn annotate_average(hour: u8, price: f64, sample_count: usize) -> AnnotatedRow {
    let band = classify_hour(hour);
    AnnotatedRow {
        date: None,
        formatted_date: None,
        hour,
        hour_label: hour_label(hour),
        price,
        band,
        band_name: band.display_name(),
        band_color: band.color(),
        sample_count: Some(sample_count),
    }
}

/// Position of both range endpoints in the sorted date list
///
/// `None` when either endpoint is empty or not an available date.
pub fn range_indices(dates: &[String], range: &DateRange) -> Option<(usize, usize)> {
    let start = dates.iter().position(|d| *d == range.start)?;
    let end = dates.iter().position(|d| *d == range.end)?;
    Some((start, end))
}

/// Dates covered by the range, inclusive
///
/// Empty when an endpoint cannot be resolved or the endpoints are reversed.
pub fn range_dates<'a>(dates: &'a [String], range: &DateRange) -> &'a [String] {
    match range_indices(dates, range) {
        Some((start, end)) if start <= end => &dates[start..=end],
        _ => &[],
    }
}

/// Rows of one day, annotated and sorted by hour
pub fn single_day_series(rows: &[PriceRow], date: &str) -> Vec<AnnotatedRow> {
    let mut series: Vec<AnnotatedRow> = rows
        .iter()
        .filter(|row| row.date == date)
        .map(annotate_row)
        .collect();

    // Stable: duplicate hours keep their file order
    series.sort_by_key(|row| row.hour);
    series
}

/// Per-hour averages over the selected range
///
/// Each emitted row carries the number of days that contributed. If a day
/// has the same hour twice, its first row wins.
pub fn range_series(rows: &[PriceRow], dates: &[String], range: &DateRange) -> Vec<AnnotatedRow> {
    let selected = range_dates(dates, range);
    if selected.is_empty() {
        return Vec::new();
    }

    let mut by_day_hour: HashMap<(&str, u8), f64> = HashMap::new();
    for row in rows {
        by_day_hour
            .entry((row.date.as_str(), row.hour))
            .or_insert(row.price);
    }

    let mut series = Vec::new();

    for hour in HOURS {
        let values: Vec<f64> = selected
            .iter()
            .filter_map(|date| by_day_hour.get(&(date.as_str(), hour)).copied())
            .collect();

        if values.is_empty() {
            continue;
        }

        let mean = values.iter().sum::<f64>() / values.len() as f64;
        series.push(annotate_average(hour, mean, values.len()));
    }

    series
}

/// Series for the hourly chart in the current view mode
pub fn displayed_series(
    rows: &[PriceRow],
    dates: &[String],
    mode: ViewMode,
    selected_date: &str,
    range: &DateRange,
) -> Vec<AnnotatedRow> {
    match mode {
        ViewMode::Single => single_day_series(rows, selected_date),
        ViewMode::Range => range_series(rows, dates, range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tariff::TariffBand;

    fn sample_rows() -> Vec<PriceRow> {
        vec![
            PriceRow::new("20250918", 8, 135.0),
            PriceRow::new("20250917", 14, 88.11),
            PriceRow::new("20250917", 8, 129.22),
            PriceRow::new("20250919", 8, 120.0),
            PriceRow::new("20250919", 20, 150.0),
        ]
    }

    // ========================================================================
    // available_dates / range helpers
    // ========================================================================

    #[test]
    fn test_available_dates_sorted_distinct() {
        let dates = available_dates(&sample_rows());
        assert_eq!(dates, vec!["20250917", "20250918", "20250919"]);
    }

    #[test]
    fn test_range_dates_inclusive() {
        let dates = available_dates(&sample_rows());

        let covered = range_dates(&dates, &DateRange::new("20250917", "20250918"));
        assert_eq!(covered, &["20250917".to_string(), "20250918".to_string()]);
    }

    #[test]
    fn test_range_dates_unknown_endpoint_is_empty() {
        let dates = available_dates(&sample_rows());

        assert!(range_dates(&dates, &DateRange::new("20250917", "20251231")).is_empty());
        assert!(range_dates(&dates, &DateRange::new("20250917", "")).is_empty());
        assert!(range_dates(&dates, &DateRange::new("20250919", "20250917")).is_empty());
    }

    // ========================================================================
    // Single mode
    // ========================================================================

    #[test]
    fn test_single_day_series_annotates_and_sorts() {
        let series = single_day_series(&sample_rows(), "20250917");

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].hour, 8);
        assert_eq!(series[0].band, TariffBand::F1);
        assert_eq!(series[0].hour_label, "08:00");
        assert_eq!(series[0].formatted_date.as_deref(), Some("17/09/2025"));
        assert_eq!(series[1].hour, 14);
        assert_eq!(series[1].band, TariffBand::F1);
        assert_eq!(series[1].sample_count, None);
    }

    #[test]
    fn test_single_day_series_unknown_date() {
        assert!(single_day_series(&sample_rows(), "20200101").is_empty());
    }

    // ========================================================================
    // Range mode
    // ========================================================================

    #[test]
    fn test_range_series_two_day_average() {
        let rows = sample_rows();
        let dates = available_dates(&rows);

        let series = range_series(&rows, &dates, &DateRange::new("20250917", "20250918"));

        // Hour 8 on both days, hour 14 only on the 17th
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].hour, 8);
        assert!((series[0].price - 132.11).abs() < 1e-9);
        assert_eq!(series[0].sample_count, Some(2));
        assert_eq!(series[0].date, None);
        assert_eq!(series[1].hour, 14);
        assert!((series[1].price - 88.11).abs() < 1e-9);
        assert_eq!(series[1].sample_count, Some(1));
    }

    #[test]
    fn test_range_series_omits_hours_without_data() {
        let rows = sample_rows();
        let dates = available_dates(&rows);

        let series = range_series(&rows, &dates, &DateRange::new("20250917", "20250919"));
        let hours: Vec<u8> = series.iter().map(|r| r.hour).collect();

        assert_eq!(hours, vec![8, 14, 20]);
        assert_eq!(series[2].band, TariffBand::F2);
        assert_eq!(series[2].sample_count, Some(1));
    }

    #[test]
    fn test_range_series_is_order_independent() {
        let rows = sample_rows();
        let mut reversed = rows.clone();
        reversed.reverse();
        let dates = available_dates(&rows);
        let range = DateRange::new("20250917", "20250919");

        let a = range_series(&rows, &dates, &range);
        let b = range_series(&reversed, &dates, &range);

        assert_eq!(a, b);
        // Hour 8: mean of 129.22, 135.0, 120.0
        assert!((a[0].price - (129.22 + 135.0 + 120.0) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_range_series_unresolved_endpoint_is_empty() {
        let rows = sample_rows();
        let dates = available_dates(&rows);

        assert!(range_series(&rows, &dates, &DateRange::new("20250917", "")).is_empty());
        assert!(range_series(&rows, &dates, &DateRange::default()).is_empty());
    }

    #[test]
    fn test_displayed_series_dispatches_on_mode() {
        let rows = sample_rows();
        let dates = available_dates(&rows);
        let range = DateRange::new("20250917", "20250919");

        let single = displayed_series(&rows, &dates, ViewMode::Single, "20250919", &range);
        assert_eq!(single.len(), 2);
        assert!(single.iter().all(|r| r.sample_count.is_none()));

        let averaged = displayed_series(&rows, &dates, ViewMode::Range, "20250919", &range);
        assert!(averaged.iter().all(|r| r.sample_count.is_some()));
    }
}
