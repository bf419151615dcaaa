//! Command-line and environment configuration
//!
//! Every option maps onto a `DashboardState` transition, so invalid values
//! (unknown dates, months without data) are reported and skipped rather than
//! aborting the run.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::{debug, warn};

use crate::state::DashboardState;
use crate::transformations::month_token;
use crate::types::{RangeEndpoint, ViewMode};

/// How the CLI prints the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "pun-dashboard")]
#[command(about = "Italian PUN hourly price dashboard (Prezzo Unico Nazionale)", long_about = None)]
#[command(version)]
pub struct DashboardConfig {
    /// CSV file to import (header `Date;Hour;PUN`); the embedded sample is used otherwise
    #[arg(long, env = "PUN_DASHBOARD_CSV")]
    pub csv: Option<PathBuf>,

    /// Single day or averaged range view
    #[arg(long, value_enum, default_value_t = ViewMode::Single)]
    pub mode: ViewMode,

    /// Selected day for the single view (YYYYMMDD)
    #[arg(long)]
    pub date: Option<String>,

    /// Range start (YYYYMMDD), defaults to the first available day
    #[arg(long)]
    pub start: Option<String>,

    /// Range end (YYYYMMDD), defaults to the last available day
    #[arg(long)]
    pub end: Option<String>,

    /// Calendar month to show (YYYY-MM), defaults to the selected day's month
    #[arg(long)]
    pub month: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the loaded dataset as CSV instead of the dashboard
    #[arg(long)]
    pub dump_csv: bool,

    /// Log level for this crate (overridden by RUST_LOG)
    #[arg(long, env = "PUN_DASHBOARD_LOG", default_value = "info")]
    pub log_level: String,
}

impl DashboardConfig {
    /// Build the dashboard state this configuration describes
    ///
    /// A failed import keeps the sample dataset; the error is carried in the
    /// state (and so in the rendered view).
    pub fn build_state(&self) -> DashboardState {
        let mut state = DashboardState::new();

        if let Some(path) = &self.csv {
            if let Err(e) = state.import_file(path) {
                debug!(path = %path.display(), error = %e, "using sample dataset");
            }
        }

        state.set_view_mode(self.mode);

        if let Some(date) = &self.date {
            if !state.select_date(date) {
                warn!(date = %date, "no data for --date, keeping {}", state.selected_date());
            }
        }

        for (endpoint, value) in [
            (RangeEndpoint::Start, &self.start),
            (RangeEndpoint::End, &self.end),
        ] {
            if let Some(date) = value {
                if !state.set_range_endpoint(endpoint, date) {
                    warn!(date = %date, ?endpoint, "no data for range endpoint, ignored");
                }
            }
        }

        // --date moves the calendar along unless a month is requested
        match &self.month {
            Some(month) => {
                if !state.show_month(month) {
                    warn!(month = %month, "no data for --month, ignored");
                }
            }
            None => {
                if let Some(month) = month_token(state.selected_date()) {
                    state.show_month(&month);
                }
            }
        }

        state
    }
}
