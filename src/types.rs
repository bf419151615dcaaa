//! Data structures for the PUN dashboard
//!
//! `PriceRow` is the only authoritative record. Everything else here is
//! derived from the current rows and selection on every read and handed to
//! the presentation layer.

use serde::Serialize;

use crate::tariff::TariffBand;

/// One hourly PUN price
///
/// Produced by the embedded default dataset or by the CSV importer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRow {
    /// Day in YYYYMMDD format (zero-padded, so lexicographic order is chronological)
    /// Example: "20250917"
    pub date: String,

    /// Hour of the day, 1..=24 (hour 1 covers 00:00–01:00)
    pub hour: u8,

    /// Price in EUR/MWh
    pub price: f64,
}

impl PriceRow {
    pub fn new(date: impl Into<String>, hour: u8, price: f64) -> Self {
        Self {
            date: date.into(),
            hour,
            price,
        }
    }
}

/// A price row enriched with display metadata for the hourly chart
///
/// For range views the row is a cross-day average: `date` is `None` and
/// `sample_count` holds the number of contributing days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedRow {
    /// Source day, `None` for averaged rows
    pub date: Option<String>,

    /// Source day as DD/MM/YYYY, `None` for averaged rows
    pub formatted_date: Option<String>,

    pub hour: u8,

    /// Hour label, e.g. "08:00"
    pub hour_label: String,

    pub price: f64,

    pub band: TariffBand,

    /// e.g. "F1 - Punta"
    pub band_name: &'static str,

    /// Hex bar color
    pub band_color: &'static str,

    /// Number of days averaged into this row (range views only)
    pub sample_count: Option<usize>,
}

/// Whether the hourly chart shows one day or a multi-day average
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Single,
    Range,
}

/// Selected date range (range mode)
///
/// Empty strings mean "not chosen yet". When both endpoints are set,
/// `start <= end` holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DateRange {
    /// Start date (YYYYMMDD) or empty
    pub start: String,

    /// End date (YYYYMMDD) or empty
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Both endpoints chosen
    pub fn is_complete(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty()
    }

    /// Neither endpoint chosen
    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }
}

/// Which endpoint of a `DateRange` a control edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEndpoint {
    Start,
    End,
}

/// Average price of one day, for the overview bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAverage {
    /// YYYYMMDD
    pub date: String,

    /// Short label, DD/MM
    pub label: String,

    pub average: f64,

    /// Day is the selected date (single) or inside the selected range
    pub is_selected: bool,
}

/// One cell of the calendar grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    /// Day of month, 0 for padding cells
    pub day: u32,

    /// Leading padding before day 1
    pub is_empty: bool,

    /// Dataset has rows for this day
    pub available: bool,

    pub selected: bool,

    /// Day is the start or end of the selected range
    pub is_endpoint: bool,

    /// YYYYMMDD, `None` for padding cells
    pub date: Option<String>,
}

impl CalendarDay {
    pub(crate) fn padding() -> Self {
        Self {
            day: 0,
            is_empty: true,
            available: false,
            selected: false,
            is_endpoint: false,
            date: None,
        }
    }
}

/// Calendar grid for one month (7 columns, Sunday first)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CalendarModel {
    pub days: Vec<CalendarDay>,

    /// e.g. "Settembre 2025"; empty when there is no data
    pub month_label: String,

    /// Month token YYYY-MM shown, `None` when there is no data
    pub month: Option<String>,

    /// e.g. "3 di 4 mesi"
    pub position_label: String,

    pub can_prev: bool,

    pub can_next: bool,

    /// Hint shown in range mode ("Seleziona data inizio", ...)
    pub range_prompt: Option<&'static str>,
}

/// Summary statistics over the displayed series
///
/// A band with no rows in the series reports `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub range: f64,
    pub f1_average: Option<f64>,
    pub f2_average: Option<f64>,
    pub f3_average: Option<f64>,
}

impl Stats {
    /// Average for one band
    pub fn band_average(&self, band: TariffBand) -> Option<f64> {
        match band {
            TariffBand::F1 => self.f1_average,
            TariffBand::F2 => self.f2_average,
            TariffBand::F3 => self.f3_average,
        }
    }
}

/// Y-axis bounds for the hourly chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
}

/// Row and day counts of the loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub days: usize,

    /// Rows come from an imported CSV rather than the embedded sample
    pub imported: bool,
}

/// Everything the presentation layer needs for one render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub view_mode: ViewMode,
    pub selected_date: String,
    pub date_range: DateRange,

    /// Hourly chart series
    pub series: Vec<AnnotatedRow>,

    /// Overview chart series
    pub daily: Vec<DailyAverage>,

    pub calendar: CalendarModel,

    /// `None` when the series is empty
    pub stats: Option<Stats>,

    /// `None` when the series is empty
    pub axis: Option<AxisDomain>,

    /// Days covered by a complete range, `None` otherwise
    pub range_days: Option<usize>,

    pub dataset: DatasetSummary,

    pub calendar_open: bool,

    /// Last import error message, if any
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_completeness() {
        assert!(DateRange::default().is_empty());
        assert!(!DateRange::default().is_complete());

        let half = DateRange::new("20250917", "");
        assert!(!half.is_empty());
        assert!(!half.is_complete());

        let full = DateRange::new("20250917", "20250918");
        assert!(full.is_complete());
    }

    #[test]
    fn test_view_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ViewMode::Range).unwrap(), "\"range\"");
        assert_eq!(ViewMode::default(), ViewMode::Single);
    }

    #[test]
    fn test_stats_band_lookup() {
        let stats = Stats {
            min: 1.0,
            max: 3.0,
            average: 2.0,
            range: 2.0,
            f1_average: Some(3.0),
            f2_average: None,
            f3_average: Some(1.0),
        };

        assert_eq!(stats.band_average(TariffBand::F1), Some(3.0));
        assert_eq!(stats.band_average(TariffBand::F2), None);
    }

    #[test]
    fn test_price_row_json_shape() {
        let row = PriceRow::new("20250917", 8, 129.22);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["date"], "20250917");
        assert_eq!(json["hour"], 8);
    }
}
