//! PUN Dashboard - Italian day-ahead electricity price dashboard core
//!
//! Turns hourly PUN (Prezzo Unico Nazionale) prices into everything a
//! dashboard renders: the hourly chart series for one day or a multi-day
//! average, the daily overview bars, the popup calendar grid and the
//! summary statistics with F1/F2/F3 tariff band averages.
//!
//! # Features
//! - CSV import (`Date;Hour;PUN`, comma or period decimals), all-or-nothing
//! - Tariff band classification (fasce orarie F1/F2/F3)
//! - Single-day and range (per-hour average) views
//! - Month-grid calendar over the months that contain data
//! - Explicit application state with one method per user interaction
//!
//! # Example
//!
//! ```rust
//! use pun_dashboard::{DashboardState, ViewMode};
//!
//! let mut state = DashboardState::new();
//! state
//!     .import_csv("Date;Hour;PUN\n20250917;8;129,22\n20250918;8;135,0")
//!     .unwrap();
//! state.set_view_mode(ViewMode::Range);
//!
//! let view = state.view();
//! assert_eq!(view.series[0].sample_count, Some(2));
//! ```

pub mod aggregator;
pub mod calendar;
pub mod config;
pub mod csv_parser;
pub mod default_data;
mod error;
pub mod overview;
pub mod state;
pub mod stats;
pub mod tariff;
pub mod transformations;
mod types;

// Re-export public types for easier access
pub use calendar::CalendarDirection;
pub use config::{DashboardConfig, OutputFormat};
pub use error::{DashboardError, ImportError};
pub use state::DashboardState;
pub use tariff::TariffBand;
pub use types::{
    AnnotatedRow, AxisDomain, CalendarDay, CalendarModel, DailyAverage, DashboardView,
    DatasetSummary, DateRange, PriceRow, RangeEndpoint, Stats, ViewMode,
};
