//! Transformation helpers for the PUN dashboard
//!
//! Small pure conversions shared by the importer, the aggregator and the
//! calendar builder.
//!
//! # Transformations
//!
//! 1. **Comma decimal conversion**: `"129,22"` → `129.22`
//! 2. **Hour validation**: `"8"` → `8` (1..=24 only)
//! 3. **Date validation**: `"20250917"` → `2025-09-17`
//! 4. **Labels**: `8` → `"08:00"`, `"20250917"` → `"17/09/2025"` / `"17/09"`
//! 5. **Month tokens**: `"20250917"` → `"2025-09"`
//! 6. **Month geometry**: days in month, weekday of day 1 (Sunday = 0)
//!
//! # Example
//!
//! ```rust
//! use pun_dashboard::transformations::*;
//!
//! assert_eq!(parse_comma_decimal("129,22"), Some(129.22));
//! assert_eq!(hour_label(8), "08:00");
//! assert_eq!(format_date_long("20250917"), "17/09/2025");
//! assert_eq!(month_token("20250917").as_deref(), Some("2025-09"));
//! ```

use chrono::{Datelike, NaiveDate};

/// Italian month names, January first
const MONTH_NAMES: [&str; 12] = [
    "Gennaio",
    "Febbraio",
    "Marzo",
    "Aprile",
    "Maggio",
    "Giugno",
    "Luglio",
    "Agosto",
    "Settembre",
    "Ottobre",
    "Novembre",
    "Dicembre",
];

// ============================================================================
// Value parsing
// ============================================================================

/// Parse a price that may use a comma as decimal separator
///
/// Returns `None` for empty input, garbage, and non-finite results
/// ("inf", "NaN").
///
/// # Examples
///
/// ```
/// # use pun_dashboard::transformations::parse_comma_decimal;
/// assert_eq!(parse_comma_decimal("106,17947"), Some(106.17947));
/// assert_eq!(parse_comma_decimal("88.11"), Some(88.11));
/// assert_eq!(parse_comma_decimal("-3,5"), Some(-3.5));
/// assert_eq!(parse_comma_decimal(""), None);
/// assert_eq!(parse_comma_decimal("NaN"), None);
/// ```
pub fn parse_comma_decimal(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse an hour field, accepting only 1..=24
pub fn parse_hour(value: &str) -> Option<u8> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|h| (1..=24).contains(h))
}

/// Parse a YYYYMMDD date string into a calendar date
///
/// Requires exactly 8 ASCII digits forming a real date.
///
/// # Examples
///
/// ```
/// # use pun_dashboard::transformations::parse_day;
/// assert!(parse_day("20250917").is_some());
/// assert!(parse_day("20250231").is_none()); // February 31st
/// assert!(parse_day("2025-09-17").is_none());
/// ```
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    NaiveDate::parse_from_str(value, "%Y%m%d").ok()
}

// ============================================================================
// Labels
// ============================================================================

/// Hour label for the chart axis: `8` → `"08:00"`
pub fn hour_label(hour: u8) -> String {
    format!("{:02}:00", hour)
}

/// Full date label: `"20250917"` → `"17/09/2025"`
///
/// Unparseable input is returned unchanged.
pub fn format_date_long(date: &str) -> String {
    match parse_day(date) {
        Some(day) => day.format("%d/%m/%Y").to_string(),
        None => date.to_string(),
    }
}

/// Short date label: `"20250917"` → `"17/09"`
///
/// Unparseable input is returned unchanged.
pub fn format_date_short(date: &str) -> String {
    match parse_day(date) {
        Some(day) => day.format("%d/%m").to_string(),
        None => date.to_string(),
    }
}

/// Build a YYYYMMDD string from its components
pub fn date_string(year: i32, month: u32, day: u32) -> String {
    format!("{:04}{:02}{:02}", year, month, day)
}

// ============================================================================
// Months
// ============================================================================

/// Month token of a date: `"20250917"` → `"2025-09"`
pub fn month_token(date: &str) -> Option<String> {
    let year = date.get(0..4)?;
    let month = date.get(4..6)?;
    Some(format!("{}-{}", year, month))
}

/// Split a month token into (year, month)
///
/// # Examples
///
/// ```
/// # use pun_dashboard::transformations::parse_month_token;
/// assert_eq!(parse_month_token("2025-09"), Some((2025, 9)));
/// assert_eq!(parse_month_token("2025-13"), None);
/// ```
pub fn parse_month_token(token: &str) -> Option<(i32, u32)> {
    let (year, month) = token.split_once('-')?;
    let year = year.parse::<i32>().ok()?;
    let month = month.parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)?;
    Some((year, month))
}

/// Number of days in a month
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Weekday column of the 1st of a month, Sunday = 0 .. Saturday = 6
pub fn first_weekday(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|d| d.weekday().num_days_from_sunday())
}

/// Italian month name, 1-based (`9` → `"Settembre"`)
pub fn month_name(month: u32) -> Option<&'static str> {
    let idx = usize::try_from(month.checked_sub(1)?).ok()?;
    MONTH_NAMES.get(idx).copied()
}

/// Month label for the calendar header: `"2025-09"` → `"Settembre 2025"`
pub fn month_label(token: &str) -> Option<String> {
    let (year, month) = parse_month_token(token)?;
    Some(format!("{} {}", month_name(month)?, year))
}
