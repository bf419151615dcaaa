//! Summary statistics and chart axis bounds for the displayed series
//!
//! Both are undefined for an empty series and return `None` there; the
//! presentation layer hides the summary cards in that case.

use crate::tariff::TariffBand;
use crate::types::{AnnotatedRow, AxisDomain, Stats};

/// Axis padding as a fraction of the price range
const AXIS_PADDING: f64 = 0.1;

/// Axis bounds are rounded outward to multiples of this step
const AXIS_STEP: f64 = 5.0;

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Mean price of the rows in one band, `None` if the band has no rows
pub fn band_average(series: &[AnnotatedRow], band: TariffBand) -> Option<f64> {
    mean(series.iter().filter(|row| row.band == band).map(|row| row.price))
}

/// Min, max, mean, range and per-band means over the series
///
/// # Returns
///
/// * `Some(Stats)` - For a non-empty series
/// * `None` - For an empty series
///
/// # Example
///
/// ```
/// # use pun_dashboard::aggregator::single_day_series;
/// # use pun_dashboard::stats::compute_stats;
/// # use pun_dashboard::PriceRow;
/// let rows = vec![PriceRow::new("20250917", 8, 129.22), PriceRow::new("20250917", 3, 88.11)];
/// let stats = compute_stats(&single_day_series(&rows, "20250917")).unwrap();
///
/// assert!((stats.average - 108.665).abs() < 1e-9);
/// assert!((stats.range - 41.11).abs() < 1e-9);
/// assert_eq!(stats.f2_average, None); // no F2 hours
/// ```
pub fn compute_stats(series: &[AnnotatedRow]) -> Option<Stats> {
    let average = mean(series.iter().map(|row| row.price))?;

    let min = series.iter().map(|row| row.price).fold(f64::INFINITY, f64::min);
    let max = series
        .iter()
        .map(|row| row.price)
        .fold(f64::NEG_INFINITY, f64::max);

    Some(Stats {
        min,
        max,
        average,
        range: max - min,
        f1_average: band_average(series, TariffBand::F1),
        f2_average: band_average(series, TariffBand::F2),
        f3_average: band_average(series, TariffBand::F3),
    })
}

/// Y-axis bounds for the hourly chart
///
/// Pads the price range by 10% on both sides, keeps the lower bound at or
/// above zero and rounds both bounds outward to a multiple of 5.
pub fn axis_domain(stats: &Stats) -> AxisDomain {
    let padding = stats.range * AXIS_PADDING;
    let low = (stats.min - padding).max(0.0);
    let high = stats.max + padding;

    AxisDomain {
        min: (low / AXIS_STEP).floor() * AXIS_STEP,
        max: (high / AXIS_STEP).ceil() * AXIS_STEP,
    }
}
