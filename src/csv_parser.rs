//! CSV importer for PUN price files
//!
//! Parses the semicolon-delimited export format into `PriceRow`s using the
//! csv crate.
//!
//! # CSV Format
//!
//! - **Delimiter:** Semicolon (`;`)
//! - **Encoding:** UTF-8
//! - **Decimal Separator:** Comma (`,`) or period (`.`)
//! - **Header Row:** Must contain `Date;Hour;PUN`
//! - **Data Rows:** `YYYYMMDD;hour;price`, hour in 1..=24
//! - **Blank lines:** Ignored
//!
//! Parsing is all-or-nothing: the first bad line aborts the import and no
//! rows are returned.
//!
//! # Examples
//!
//! ```rust
//! use pun_dashboard::csv_parser::parse_pun_csv;
//!
//! let csv = "Date;Hour;PUN\n20250917;8;129,22\n20250917;14;88,11";
//!
//! let rows = parse_pun_csv(csv).unwrap();
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0].hour, 8);
//! assert_eq!(rows[1].price, 88.11);
//! ```

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::debug;

use crate::error::{DashboardError, ImportError};
use crate::transformations::{parse_comma_decimal, parse_day, parse_hour};
use crate::types::PriceRow;

/// Header token sequence the first line must contain
pub const CSV_HEADER: &str = "Date;Hour;PUN";

/// Number of fields in every data row
const FIELD_COUNT: usize = 3;

// ============================================================================
// Helper Functions
// ============================================================================

/// Validate the header line
///
/// Only containment is checked, so a BOM or trailing columns in the header
/// line do not fail the import.
fn validate_header(content: &str) -> Result<(), ImportError> {
    match content.lines().next() {
        Some(header) if header.contains(CSV_HEADER) => Ok(()),
        _ => Err(ImportError::Format),
    }
}

/// 1-based physical line of the record starting at or after `byte`
///
/// csv skips empty lines without counting them and a record's position may
/// point at the terminators before it, so lines are counted on the text.
fn physical_line(content: &str, byte: u64) -> u64 {
    let start = usize::try_from(byte).map_or(content.len(), |b| b.min(content.len()));
    let rest = content.get(start..).unwrap_or("");
    let offset = start + (rest.len() - rest.trim_start_matches(['\r', '\n']).len());

    content.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count() as u64
        + 1
}

/// A whitespace-only line (csv already drops truly empty lines)
fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].is_empty()
}

/// Convert one data record into a `PriceRow`
fn parse_record(record: &StringRecord, line: u64) -> Result<PriceRow, ImportError> {
    if record.len() != FIELD_COUNT {
        return Err(ImportError::RowFormat {
            line,
            fields: record.len(),
        });
    }

    let date = &record[0];
    let hour = &record[1];
    let price = &record[2];

    let price = parse_comma_decimal(price).ok_or_else(|| ImportError::Value {
        line,
        value: price.to_string(),
    })?;

    let hour = parse_hour(hour).ok_or_else(|| ImportError::Hour {
        line,
        value: hour.to_string(),
    })?;

    if parse_day(date).is_none() {
        return Err(ImportError::Date {
            line,
            value: date.to_string(),
        });
    }

    Ok(PriceRow::new(date, hour, price))
}

// ============================================================================
// Main Parsing Functions
// ============================================================================

/// Parse a PUN CSV export into price rows
///
/// # Arguments
///
/// * `csv_content` - Raw file content
///
/// # Returns
///
/// * `Ok(Vec<PriceRow>)` - Rows in file order (at least one)
/// * `Err(ImportError::Format)` - Missing `Date;Hour;PUN` header or empty input
/// * `Err(ImportError::RowFormat)` - A data line without exactly 3 fields
/// * `Err(ImportError::Value)` - A price that is not a finite number
/// * `Err(ImportError::Hour)` - An hour outside 1..=24
/// * `Err(ImportError::Date)` - A date that is not a valid YYYYMMDD day
/// * `Err(ImportError::NoRows)` - Header without data
///
/// # Example
///
/// ```
/// # use pun_dashboard::csv_parser::parse_pun_csv;
/// # use pun_dashboard::ImportError;
/// let err = parse_pun_csv("Date,Hour,PUN\n20250917;8;129,22").unwrap_err();
/// assert_eq!(err, ImportError::Format);
///
/// let err = parse_pun_csv("Date;Hour;PUN\n20250917;8;abc").unwrap_err();
/// assert_eq!(err.line(), Some(2));
/// ```
pub fn parse_pun_csv(csv_content: &str) -> Result<Vec<PriceRow>, ImportError> {
    let content = csv_content.trim();
    validate_header(content)?;

    // No quoting: fields are split on every ';' exactly like the export writes them
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true) // Field count is checked per row to report the line
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| ImportError::Csv(e.to_string()))?;

        if is_blank(&record) {
            continue;
        }

        let line = record
            .position()
            .map(|p| physical_line(content, p.byte()))
            .unwrap_or(0);
        rows.push(parse_record(&record, line)?);
    }

    if rows.is_empty() {
        return Err(ImportError::NoRows);
    }

    debug!(rows = rows.len(), "parsed PUN csv");
    Ok(rows)
}

/// Serialize rows into the import format (comma decimals)
///
/// The output parses back with [`parse_pun_csv`] into the same rows.
pub fn write_pun_csv(rows: &[PriceRow]) -> Result<String, DashboardError> {
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(["Date", "Hour", "PUN"])
        .map_err(|e| DashboardError::Output(e.to_string()))?;

    for row in rows {
        let hour = row.hour.to_string();
        let price = row.price.to_string().replace('.', ",");
        writer
            .write_record([row.date.as_str(), hour.as_str(), price.as_str()])
            .map_err(|e| DashboardError::Output(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DashboardError::Output(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| DashboardError::Output(e.to_string()))
}
