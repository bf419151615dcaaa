//! Dashboard application state
//!
//! Holds the loaded rows and the user's selection, and exposes every UI
//! interaction as an explicit transition. Nothing derived is stored here:
//! [`DashboardState::view`] recomputes the chart series, overview, calendar
//! and statistics from scratch on every call.
//!
//! # Example
//!
//! ```rust
//! use pun_dashboard::{DashboardState, ViewMode};
//!
//! let mut state = DashboardState::new();
//! assert_eq!(state.selected_date(), "20250917");
//!
//! state.set_view_mode(ViewMode::Range);
//! let view = state.view();
//! assert_eq!(view.range_days, Some(5)); // whole sample dataset
//! ```

use std::path::Path;

use tracing::{debug, info, warn};

use crate::aggregator::{available_dates, displayed_series, range_dates, range_indices};
use crate::calendar::{
    available_months, build_calendar, cursor_for_month, initial_cursor, navigate,
    CalendarDirection,
};
use crate::csv_parser::parse_pun_csv;
use crate::default_data::{default_rows, DEFAULT_SELECTED_DATE};
use crate::error::ImportError;
use crate::overview::daily_averages;
use crate::stats::{axis_domain, compute_stats};
use crate::types::{
    DashboardView, DatasetSummary, DateRange, PriceRow, RangeEndpoint, ViewMode,
};

/// Explicit store for the dashboard's rows and selection
#[derive(Debug, Clone)]
pub struct DashboardState {
    rows: Vec<PriceRow>,
    imported: bool,
    selected_date: String,
    view_mode: ViewMode,
    date_range: DateRange,
    calendar_cursor: usize,
    calendar_open: bool,
    loading: bool,
    error: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    /// State over the embedded sample dataset
    pub fn new() -> Self {
        let mut state = Self {
            rows: Vec::new(),
            imported: false,
            selected_date: DEFAULT_SELECTED_DATE.to_string(),
            view_mode: ViewMode::Single,
            date_range: DateRange::default(),
            calendar_cursor: 0,
            calendar_open: false,
            loading: false,
            error: None,
        };
        state.replace_rows(default_rows(), DEFAULT_SELECTED_DATE.to_string(), false);
        state
    }

    /// State over an already parsed dataset, selecting its first row's date
    pub fn from_rows(rows: Vec<PriceRow>) -> Self {
        let selected = rows.first().map(|r| r.date.clone()).unwrap_or_default();
        let mut state = Self::new();
        state.replace_rows(rows, selected, true);
        state
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    /// Sorted distinct dates of the loaded rows
    pub fn available_dates(&self) -> Vec<String> {
        available_dates(&self.rows)
    }

    pub fn selected_date(&self) -> &str {
        &self.selected_date
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn date_range(&self) -> &DateRange {
        &self.date_range
    }

    pub fn calendar_cursor(&self) -> usize {
        self.calendar_cursor
    }

    pub fn is_calendar_open(&self) -> bool {
        self.calendar_open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Rows come from an imported CSV
    pub fn is_imported(&self) -> bool {
        self.imported
    }

    /// Message of the last failed import, cleared by the next success
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn is_available(&self, date: &str) -> bool {
        self.rows.iter().any(|r| r.date == date)
    }

    // ========================================================================
    // Dataset
    // ========================================================================

    /// Swap in a new dataset and reset the selection around it
    ///
    /// The range spans all available dates and the calendar jumps to the
    /// selected date's month.
    fn replace_rows(&mut self, rows: Vec<PriceRow>, selected_date: String, imported: bool) {
        self.rows = rows;
        self.imported = imported;
        self.selected_date = selected_date;

        let dates = available_dates(&self.rows);
        self.date_range = match (dates.first(), dates.last()) {
            (Some(first), Some(last)) => DateRange::new(first.clone(), last.clone()),
            _ => DateRange::default(),
        };

        let months = available_months(&dates);
        self.calendar_cursor = initial_cursor(&months, &self.selected_date);
        self.error = None;
    }

    /// Import CSV text, all-or-nothing
    ///
    /// On success the rows are replaced, the first row's date is selected and
    /// the number of rows is returned. On failure the current dataset is kept
    /// and the message is stored in [`DashboardState::error`].
    pub fn import_csv(&mut self, text: &str) -> Result<usize, ImportError> {
        match parse_pun_csv(text) {
            Ok(rows) => {
                let count = rows.len();
                let selected = rows.first().map(|r| r.date.clone()).unwrap_or_default();
                self.replace_rows(rows, selected, true);
                info!(
                    rows = count,
                    selected = %self.selected_date,
                    "imported PUN dataset"
                );
                Ok(count)
            }
            Err(e) => Err(self.fail_import(e)),
        }
    }

    /// Mark an import of `path` as pending
    ///
    /// The front end calls this before it starts reading the file and hands
    /// the content to [`DashboardState::finish_import`] once the read is done.
    /// Rejected with [`ImportError::InProgress`] while another import is
    /// pending and with [`ImportError::NotCsv`] for non-`.csv` paths.
    pub fn begin_import(&mut self, path: &Path) -> Result<(), ImportError> {
        if self.loading {
            warn!(path = %path.display(), "import already pending, ignored");
            return Err(ImportError::InProgress);
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            return Err(self.fail_import(ImportError::NotCsv(path.display().to_string())));
        }

        debug!(path = %path.display(), "import pending");
        self.loading = true;
        Ok(())
    }

    /// Complete the pending import with the result of the file read
    pub fn finish_import(
        &mut self,
        content: Result<String, ImportError>,
    ) -> Result<usize, ImportError> {
        self.loading = false;

        match content {
            Ok(text) => self.import_csv(&text),
            Err(e) => Err(self.fail_import(e)),
        }
    }

    /// Read and import a `.csv` file in one step
    pub fn import_file(&mut self, path: &Path) -> Result<usize, ImportError> {
        self.begin_import(path)?;
        let content = std::fs::read_to_string(path).map_err(ImportError::from);
        self.finish_import(content)
    }

    fn fail_import(&mut self, err: ImportError) -> ImportError {
        warn!(error = %err, "csv import failed, keeping current dataset");
        self.error = Some(format!("Errore: {}", err));
        err
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        debug!(?mode, "view mode changed");
        self.view_mode = mode;
    }

    /// Select a day for the single-day view
    ///
    /// Returns `false` (and changes nothing) for dates without data.
    pub fn select_date(&mut self, date: &str) -> bool {
        if !self.is_available(date) {
            return false;
        }
        self.selected_date = date.to_string();
        true
    }

    /// Click on an overview bar: selects the day in single mode only
    pub fn click_overview_day(&mut self, date: &str) -> bool {
        self.view_mode == ViewMode::Single && self.select_date(date)
    }

    /// Click on a calendar cell
    ///
    /// Single mode selects the day and closes the popup. Range mode starts a
    /// new range on the first click (or after a complete range) and completes
    /// it on the second, ordering the endpoints and closing the popup.
    pub fn click_calendar_date(&mut self, date: &str) -> bool {
        if !self.is_available(date) {
            return false;
        }

        match self.view_mode {
            ViewMode::Single => {
                self.selected_date = date.to_string();
                self.calendar_open = false;
            }
            ViewMode::Range => {
                if self.date_range.start.is_empty() || self.date_range.is_complete() {
                    self.date_range = DateRange::new(date, "");
                } else {
                    let start = std::mem::take(&mut self.date_range.start);
                    self.date_range = if start.as_str() <= date {
                        DateRange::new(start, date)
                    } else {
                        DateRange::new(date, start)
                    };
                    self.calendar_open = false;
                }
            }
        }

        debug!(range = ?self.date_range, selected = %self.selected_date, "calendar click");
        true
    }

    /// Set one range endpoint from its dedicated control
    ///
    /// If both endpoints resolve and end up reversed they are swapped, so
    /// `start <= end` always holds.
    pub fn set_range_endpoint(&mut self, endpoint: RangeEndpoint, date: &str) -> bool {
        if !self.is_available(date) {
            return false;
        }

        match endpoint {
            RangeEndpoint::Start => self.date_range.start = date.to_string(),
            RangeEndpoint::End => self.date_range.end = date.to_string(),
        }

        let dates = available_dates(&self.rows);
        if let Some((start, end)) = range_indices(&dates, &self.date_range) {
            if start > end {
                let range = &mut self.date_range;
                std::mem::swap(&mut range.start, &mut range.end);
            }
        }
        true
    }

    /// Clear both range endpoints
    pub fn reset_range(&mut self) {
        self.date_range = DateRange::default();
    }

    // ========================================================================
    // Calendar popup
    // ========================================================================

    pub fn toggle_calendar(&mut self) {
        self.calendar_open = !self.calendar_open;
    }

    pub fn close_calendar(&mut self) {
        self.calendar_open = false;
    }

    pub fn navigate_calendar(&mut self, direction: CalendarDirection) {
        let months = available_months(&available_dates(&self.rows));
        self.calendar_cursor = navigate(self.calendar_cursor, months.len(), direction);
    }

    /// Jump to a month token (YYYY-MM); `false` if that month has no data
    pub fn show_month(&mut self, token: &str) -> bool {
        let months = available_months(&available_dates(&self.rows));
        match cursor_for_month(&months, token) {
            Some(cursor) => {
                self.calendar_cursor = cursor;
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Derived view
    // ========================================================================

    /// Derive everything the presentation layer renders
    pub fn view(&self) -> DashboardView {
        let dates = available_dates(&self.rows);
        let months = available_months(&dates);

        let series = displayed_series(
            &self.rows,
            &dates,
            self.view_mode,
            &self.selected_date,
            &self.date_range,
        );
        let stats = compute_stats(&series);
        let axis = stats.as_ref().map(axis_domain);

        let daily = daily_averages(
            &self.rows,
            &dates,
            self.view_mode,
            &self.selected_date,
            &self.date_range,
        );

        let calendar = build_calendar(
            &months,
            self.calendar_cursor,
            &dates,
            self.view_mode,
            &self.selected_date,
            &self.date_range,
        );

        let covered = range_dates(&dates, &self.date_range).len();

        DashboardView {
            view_mode: self.view_mode,
            selected_date: self.selected_date.clone(),
            date_range: self.date_range.clone(),
            series,
            daily,
            calendar,
            stats,
            axis,
            range_days: (covered > 0).then_some(covered),
            dataset: DatasetSummary {
                rows: self.rows.len(),
                days: dates.len(),
                imported: self.imported,
            },
            calendar_open: self.calendar_open,
            error: self.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tariff::TariffBand;

    const TWO_DAYS_CSV: &str = "Date;Hour;PUN\n20250918;8;135,0\n20250917;8;129,22\n20250917;14;88,11";

    // ========================================================================
    // Construction
    // ========================================================================

    #[test]
    fn test_new_uses_sample_dataset() {
        let state = DashboardState::new();
        let view = state.view();

        assert_eq!(state.selected_date(), "20250917");
        assert_eq!(state.view_mode(), ViewMode::Single);
        assert_eq!(state.date_range(), &DateRange::new("20241101", "20250918"));
        assert!(!state.is_imported());
        assert_eq!(view.series.len(), 24);
        assert_eq!(view.dataset.days, 5);
        assert_eq!(view.calendar.month.as_deref(), Some("2025-09"));
        assert_eq!(state.calendar_cursor(), 3);
    }

    #[test]
    fn test_from_rows_selects_first_row() {
        let state = DashboardState::from_rows(parse_pun_csv(TWO_DAYS_CSV).unwrap());

        assert_eq!(state.selected_date(), "20250918");
        assert!(state.is_imported());
        assert_eq!(state.date_range(), &DateRange::new("20250917", "20250918"));
    }

    // ========================================================================
    // Import
    // ========================================================================

    #[test]
    fn test_import_csv_replaces_dataset() {
        let mut state = DashboardState::new();

        let count = state.import_csv(TWO_DAYS_CSV).unwrap();

        assert_eq!(count, 3);
        assert_eq!(state.rows().len(), 3);
        assert_eq!(state.selected_date(), "20250918");
        assert_eq!(state.error(), None);

        let view = state.view();
        assert_eq!(view.dataset.rows, 3);
        assert_eq!(view.dataset.days, 2);
        assert!(view.dataset.imported);
    }

    #[test]
    fn test_import_wrong_header_keeps_previous_dataset() {
        let mut state = DashboardState::new();
        state.select_date("20250918");

        let err = state
            .import_csv("Date,Hour,PUN\n20250917,8,129.22")
            .unwrap_err();

        assert_eq!(err, ImportError::Format);
        assert_eq!(state.rows().len(), 64);
        assert_eq!(state.selected_date(), "20250918");
        assert!(state.error().unwrap().contains("Date;Hour;PUN"));
        assert_eq!(state.view().series.len(), 24);
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let mut state = DashboardState::new();

        let err = state
            .import_csv("Date;Hour;PUN\n20250917;1;10\n20250917;2;oops")
            .unwrap_err();

        assert_eq!(err.line(), Some(3));
        assert_eq!(state.rows().len(), 64);
        assert!(!state.is_imported());
    }

    #[test]
    fn test_successful_import_clears_error() {
        let mut state = DashboardState::new();
        let _ = state.import_csv("garbage");
        assert!(state.error().is_some());

        state.import_csv(TWO_DAYS_CSV).unwrap();
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_import_file_rejects_non_csv() {
        let mut state = DashboardState::new();

        let err = state.import_file(Path::new("prices.xlsx")).unwrap_err();

        assert!(matches!(err, ImportError::NotCsv(_)));
        assert!(state.error().is_some());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_import_file_missing_file() {
        let mut state = DashboardState::new();

        let err = state
            .import_file(Path::new("/nonexistent/dir/prices.csv"))
            .unwrap_err();

        assert!(matches!(err, ImportError::Io(_)));
        assert!(!state.is_loading());
        assert_eq!(state.rows().len(), 64);
    }

    #[test]
    fn test_second_import_while_pending_is_rejected() {
        let mut state = DashboardState::new();

        state.begin_import(Path::new("prices.csv")).unwrap();
        assert!(state.is_loading());

        let err = state.begin_import(Path::new("other.csv")).unwrap_err();
        assert_eq!(err, ImportError::InProgress);
        assert!(state.is_loading());
        assert_eq!(state.error(), None);

        let result = state.finish_import(Ok(TWO_DAYS_CSV.to_string()));
        assert_eq!(result, Ok(3));
        assert!(!state.is_loading());
        assert!(state.is_imported());
    }

    #[test]
    fn test_import_file_while_pending_is_rejected() {
        let mut state = DashboardState::new();
        state.begin_import(Path::new("prices.csv")).unwrap();

        let err = state.import_file(Path::new("prices.csv")).unwrap_err();

        assert_eq!(err, ImportError::InProgress);
        assert_eq!(state.rows().len(), 64);
    }

    #[test]
    fn test_failed_read_clears_pending_flag() {
        let mut state = DashboardState::new();
        state.begin_import(Path::new("prices.csv")).unwrap();

        let err = state
            .finish_import(Err(ImportError::Io("permission denied".to_string())))
            .unwrap_err();

        assert!(matches!(err, ImportError::Io(_)));
        assert!(!state.is_loading());
        assert!(state.error().is_some());
        assert!(state.begin_import(Path::new("prices.csv")).is_ok());
    }

    #[test]
    fn test_import_file_reads_csv() {
        let path = std::env::temp_dir().join(format!("pun_dashboard_{}.csv", std::process::id()));
        std::fs::write(&path, TWO_DAYS_CSV).unwrap();

        let mut state = DashboardState::new();
        let result = state.import_file(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(result, Ok(3));
        assert_eq!(state.selected_date(), "20250918");
    }

    // ========================================================================
    // Selection transitions
    // ========================================================================

    #[test]
    fn test_single_view_of_example_day() {
        let mut state = DashboardState::new();
        state.import_csv(TWO_DAYS_CSV).unwrap();
        assert!(state.select_date("20250917"));

        let view = state.view();

        assert_eq!(view.series.len(), 2);
        assert_eq!(view.series[0].band, TariffBand::F1);
        let stats = view.stats.unwrap();
        assert!((stats.min - 88.11).abs() < 1e-9);
        assert!((stats.max - 129.22).abs() < 1e-9);
        assert_eq!(stats.f2_average, None);
    }

    #[test]
    fn test_select_unavailable_date_is_ignored() {
        let mut state = DashboardState::new();

        assert!(!state.select_date("20990101"));
        assert_eq!(state.selected_date(), "20250917");
    }

    #[test]
    fn test_overview_click_only_in_single_mode() {
        let mut state = DashboardState::new();

        assert!(state.click_overview_day("20250918"));
        assert_eq!(state.selected_date(), "20250918");

        state.set_view_mode(ViewMode::Range);
        assert!(!state.click_overview_day("20250917"));
        assert_eq!(state.selected_date(), "20250918");
    }

    #[test]
    fn test_range_view_averages_hour_8() {
        let mut state = DashboardState::new();
        state.import_csv(TWO_DAYS_CSV).unwrap();
        state.set_view_mode(ViewMode::Range);

        let view = state.view();

        let hour_8 = view.series.iter().find(|r| r.hour == 8).unwrap();
        assert!((hour_8.price - 132.11).abs() < 1e-9);
        assert_eq!(hour_8.sample_count, Some(2));
        assert_eq!(view.range_days, Some(2));
        assert!(view.daily.iter().all(|d| d.is_selected));
    }

    #[test]
    fn test_calendar_click_single_mode_closes_popup() {
        let mut state = DashboardState::new();
        state.toggle_calendar();
        assert!(state.is_calendar_open());

        assert!(state.click_calendar_date("20250918"));

        assert_eq!(state.selected_date(), "20250918");
        assert!(!state.is_calendar_open());
    }

    #[test]
    fn test_calendar_click_unavailable_day_does_nothing() {
        let mut state = DashboardState::new();
        state.toggle_calendar();

        assert!(!state.click_calendar_date("20250919"));
        assert!(state.is_calendar_open());
    }

    #[test]
    fn test_calendar_range_clicks_order_endpoints() {
        let mut state = DashboardState::new();
        state.set_view_mode(ViewMode::Range);
        state.toggle_calendar();

        // Range is complete after load, so the first click starts over
        state.click_calendar_date("20250918");
        assert_eq!(state.date_range(), &DateRange::new("20250918", ""));
        assert!(state.is_calendar_open());
        assert!(state.view().series.is_empty());
        assert_eq!(state.view().stats, None);

        // Second click earlier than the start
        state.click_calendar_date("20250115");
        assert_eq!(state.date_range(), &DateRange::new("20250115", "20250918"));
        assert!(!state.is_calendar_open());
        assert_eq!(state.view().range_days, Some(4));
    }

    #[test]
    fn test_range_endpoint_control_swaps_reversed_range() {
        let mut state = DashboardState::new();
        state.set_view_mode(ViewMode::Range);
        state.reset_range();

        state.set_range_endpoint(RangeEndpoint::End, "20250115");
        state.set_range_endpoint(RangeEndpoint::Start, "20250918");

        let range = state.date_range();
        assert_eq!(range, &DateRange::new("20250115", "20250918"));
        assert!(range.start <= range.end);
    }

    #[test]
    fn test_range_endpoint_rejects_unknown_date() {
        let mut state = DashboardState::new();

        assert!(!state.set_range_endpoint(RangeEndpoint::Start, "20991231"));
        assert_eq!(state.date_range(), &DateRange::new("20241101", "20250918"));
    }

    #[test]
    fn test_reset_range_empties_range_view() {
        let mut state = DashboardState::new();
        state.set_view_mode(ViewMode::Range);
        state.reset_range();

        let view = state.view();
        assert!(view.series.is_empty());
        assert_eq!(view.stats, None);
        assert_eq!(view.axis, None);
        assert_eq!(view.range_days, None);
        assert_eq!(view.calendar.range_prompt, Some("Seleziona data inizio"));
    }

    // ========================================================================
    // Calendar navigation
    // ========================================================================

    #[test]
    fn test_navigate_calendar_stays_on_data_months() {
        let mut state = DashboardState::new();
        assert_eq!(state.calendar_cursor(), 3);

        state.navigate_calendar(CalendarDirection::Next);
        assert_eq!(state.calendar_cursor(), 3);

        state.navigate_calendar(CalendarDirection::Prev);
        assert_eq!(state.view().calendar.month.as_deref(), Some("2025-03"));
    }

    #[test]
    fn test_show_month() {
        let mut state = DashboardState::new();

        assert!(state.show_month("2024-11"));
        assert_eq!(state.calendar_cursor(), 0);
        assert!(!state.show_month("2024-12"));
        assert_eq!(state.calendar_cursor(), 0);
    }
}
