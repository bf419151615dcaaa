//! Daily overview: one average bar per available day
//!
//! The overview chart doubles as a date picker, so each bar carries whether
//! its day is part of the current selection.

use std::collections::HashMap;

use crate::aggregator::range_indices;
use crate::transformations::format_date_short;
use crate::types::{DailyAverage, DateRange, PriceRow, ViewMode};

/// Average price per day, ascending by date
///
/// `dates` must be the sorted distinct dates of `rows`. A day is selected
/// when it equals `selected_date` (single mode) or lies inside the resolved
/// range (range mode); an unresolvable range selects nothing.
pub fn daily_averages(
    rows: &[PriceRow],
    dates: &[String],
    mode: ViewMode,
    selected_date: &str,
    range: &DateRange,
) -> Vec<DailyAverage> {
    let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();
    for row in rows {
        let entry = totals.entry(row.date.as_str()).or_insert((0.0, 0));
        entry.0 += row.price;
        entry.1 += 1;
    }

    let span = range_indices(dates, range);

    dates
        .iter()
        .enumerate()
        .filter_map(|(index, date)| {
            let (sum, count) = totals.get(date.as_str()).copied()?;

            let is_selected = match mode {
                ViewMode::Single => date == selected_date,
                ViewMode::Range => span.is_some_and(|(start, end)| index >= start && index <= end),
            };

            Some(DailyAverage {
                date: date.clone(),
                label: format_date_short(date),
                average: sum / count as f64,
                is_selected,
            })
        })
        .collect()
}
