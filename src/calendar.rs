//! Month-grid model for the popup date picker
//!
//! Only months that contain data are navigable: the cursor is an index into
//! the sorted distinct `YYYY-MM` tokens of the available dates, not a free
//! calendar position.
//!
//! The grid has 7 columns starting on Sunday. Day 1 is preceded by one
//! padding cell per weekday before it.
//!
//! # Example
//!
//! ```rust
//! use pun_dashboard::calendar::{available_months, build_calendar};
//! use pun_dashboard::{DateRange, ViewMode};
//!
//! let dates = vec!["20250917".to_string(), "20250918".to_string()];
//! let months = available_months(&dates);
//!
//! let model = build_calendar(&months, 0, &dates, ViewMode::Single, "20250917", &DateRange::default());
//! assert_eq!(model.month_label, "Settembre 2025");
//! // 1 September 2025 is a Monday: one padding cell, then 30 days
//! assert_eq!(model.days.len(), 31);
//! assert!(model.days[0].is_empty);
//! ```

use std::collections::BTreeSet;

use crate::aggregator::range_indices;
use crate::transformations::{
    date_string, days_in_month, first_weekday, month_label, month_token, parse_month_token,
};
use crate::types::{CalendarDay, CalendarModel, DateRange, ViewMode};

/// Column headers, Sunday first (Domenica, Lunedì, ...)
pub const WEEKDAY_HEADERS: [&str; 7] = ["D", "L", "M", "M", "G", "V", "S"];

/// Calendar navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarDirection {
    Prev,
    Next,
}

/// Distinct `YYYY-MM` tokens of the available dates, ascending
pub fn available_months(dates: &[String]) -> Vec<String> {
    dates
        .iter()
        .filter_map(|date| month_token(date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Index of a month token, if it has data
pub fn cursor_for_month(months: &[String], token: &str) -> Option<usize> {
    months.iter().position(|m| m == token)
}

/// Cursor on first load: the selected date's month, else the first month
pub fn initial_cursor(months: &[String], selected_date: &str) -> usize {
    month_token(selected_date)
        .and_then(|token| cursor_for_month(months, &token))
        .unwrap_or(0)
}

/// Clamp a cursor into the month list
pub fn clamp_cursor(months_len: usize, cursor: usize) -> usize {
    cursor.min(months_len.saturating_sub(1))
}

/// Move the cursor one month, staying inside the month list
pub fn navigate(cursor: usize, months_len: usize, direction: CalendarDirection) -> usize {
    let cursor = clamp_cursor(months_len, cursor);
    match direction {
        CalendarDirection::Prev => cursor.saturating_sub(1),
        CalendarDirection::Next => clamp_cursor(months_len, cursor + 1),
    }
}

/// Whether a day cell is highlighted under the current selection
fn is_selected(
    date: &str,
    dates: &[String],
    mode: ViewMode,
    selected_date: &str,
    range: &DateRange,
) -> bool {
    match mode {
        ViewMode::Single => date == selected_date,
        ViewMode::Range if range.is_complete() => {
            let Some((start, end)) = range_indices(dates, range) else {
                return false;
            };
            match dates.binary_search_by(|d| d.as_str().cmp(date)) {
                Ok(index) => index >= start && index <= end,
                Err(_) => false,
            }
        }
        ViewMode::Range => !range.start.is_empty() && date == range.start,
    }
}

/// Prompt for the range picker header
fn range_prompt(range: &DateRange) -> &'static str {
    if range.start.is_empty() {
        "Seleziona data inizio"
    } else if range.end.is_empty() {
        "Seleziona data fine"
    } else {
        "Periodo selezionato"
    }
}

/// Build the grid for the month at `cursor`
///
/// # Arguments
///
/// * `months` - Navigable month tokens (see [`available_months`])
/// * `cursor` - Index into `months`, clamped
/// * `dates` - Sorted distinct available dates
/// * `mode`, `selected_date`, `range` - Current selection
///
/// Returns an empty model when there are no months.
pub fn build_calendar(
    months: &[String],
    cursor: usize,
    dates: &[String],
    mode: ViewMode,
    selected_date: &str,
    range: &DateRange,
) -> CalendarModel {
    let cursor = clamp_cursor(months.len(), cursor);
    let Some(token) = months.get(cursor) else {
        return CalendarModel::default();
    };
    let Some((year, month)) = parse_month_token(token) else {
        return CalendarModel::default();
    };

    let leading = first_weekday(year, month).unwrap_or(0);
    let day_count = days_in_month(year, month).unwrap_or(0);

    let mut days: Vec<CalendarDay> = (0..leading).map(|_| CalendarDay::padding()).collect();

    for day in 1..=day_count {
        let date = date_string(year, month, day);
        let available = dates.binary_search(&date).is_ok();
        let selected = is_selected(&date, dates, mode, selected_date, range);
        let is_endpoint = selected
            && mode == ViewMode::Range
            && (date == range.start || date == range.end);

        days.push(CalendarDay {
            day,
            is_empty: false,
            available,
            selected,
            is_endpoint,
            date: Some(date),
        });
    }

    CalendarModel {
        days,
        month_label: month_label(token).unwrap_or_default(),
        month: Some(token.clone()),
        position_label: format!("{} di {} mesi", cursor + 1, months.len()),
        can_prev: cursor > 0,
        can_next: cursor + 1 < months.len(),
        range_prompt: (mode == ViewMode::Range).then(|| range_prompt(range)),
    }
}
