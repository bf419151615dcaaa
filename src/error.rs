//! Error types for the PUN dashboard
//!
//! Covers every failure mode of the dashboard core:
//! - CSV import errors (missing header, malformed rows, unparseable values)
//! - Import lifecycle errors (wrong file type, import already pending, I/O)
//! - Output errors from the CLI front end (JSON serialization)
//!
//! Display strings are the Italian messages shown to the user by the widget.

use std::fmt;

/// Top-level error type for the dashboard
///
/// Supports automatic conversion from specific error types via From trait
#[derive(Debug)]
pub enum DashboardError {
    /// CSV import error
    Import(ImportError),

    /// Failed to serialize a view for output
    Output(String),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Import(e) => write!(f, "Errore: {}", e),
            DashboardError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for DashboardError {}

impl From<ImportError> for DashboardError {
    fn from(err: ImportError) -> Self {
        DashboardError::Import(err)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Output(err.to_string())
    }
}

/// CSV import errors
///
/// Any of these aborts the current import attempt. Rows parsed before the
/// failing line are discarded and the previously loaded dataset stays active.
///
/// Line numbers are 1-based physical lines of the imported text, the header
/// being line 1.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportError {
    /// First line does not contain the `Date;Hour;PUN` header (or input is empty)
    Format,

    /// Data line does not have exactly 3 fields
    ///
    /// Example: "20250917;8" (missing price)
    RowFormat { line: u64, fields: usize },

    /// Price field is not a finite number after comma → period substitution
    ///
    /// Example: "12,3x"
    Value { line: u64, value: String },

    /// Hour field is not an integer in 1..=24
    ///
    /// Example: "0", "25", "ore 8"
    Hour { line: u64, value: String },

    /// Date field is not a valid YYYYMMDD calendar date
    ///
    /// Example: "2025-09-17", "20250231"
    Date { line: u64, value: String },

    /// Header present but no data rows follow
    NoRows,

    /// Import source is not a `.csv` file
    NotCsv(String),

    /// Another import is still pending
    InProgress,

    /// File could not be read
    Io(String),

    /// Record-level failure reported by the csv reader itself
    Csv(String),
}

impl ImportError {
    /// Line number the error refers to, if any
    pub fn line(&self) -> Option<u64> {
        match self {
            ImportError::RowFormat { line, .. }
            | ImportError::Value { line, .. }
            | ImportError::Hour { line, .. }
            | ImportError::Date { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Format => {
                write!(f, "Formato CSV non valido. Header atteso: Date;Hour;PUN")
            }
            ImportError::RowFormat { line, fields } => {
                write!(
                    f,
                    "Riga {}: formato non valido ({} campi, attesi 3)",
                    line, fields
                )
            }
            ImportError::Value { line, value } => {
                write!(f, "Riga {}: valore PUN non valido '{}'", line, value)
            }
            ImportError::Hour { line, value } => {
                write!(f, "Riga {}: ora non valida '{}' (attesa 1-24)", line, value)
            }
            ImportError::Date { line, value } => {
                write!(f, "Riga {}: data non valida '{}' (attesa AAAAMMGG)", line, value)
            }
            ImportError::NoRows => {
                write!(f, "Il file CSV non contiene righe di dati")
            }
            ImportError::NotCsv(name) => {
                write!(f, "Per favore seleziona un file CSV ('{}')", name)
            }
            ImportError::InProgress => {
                write!(f, "Caricamento già in corso")
            }
            ImportError::Io(msg) => {
                write!(f, "Impossibile leggere il file: {}", msg)
            }
            ImportError::Csv(msg) => {
                write!(f, "Errore di lettura CSV: {}", msg)
            }
        }
    }
}

impl std::error::Error for ImportError {}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::Io(err.to_string())
    }
}
