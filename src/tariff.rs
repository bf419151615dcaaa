//! Tariff band classification (fasce orarie F1/F2/F3)
//!
//! Maps an hour of the day (1..=24, hour `h` covering `h-1:00`–`h:00`) to the
//! fixed Italian time-of-use band:
//!
//! | Band | Hours | Name |
//! |------|-------|------|
//! | F1 | 8..=19 | Punta |
//! | F2 | 7, 20..=23 | Intermedia |
//! | F3 | 1..=6, 24 | Fuori Punta |
//!
//! # Example
//!
//! ```rust
//! use pun_dashboard::tariff::{classify_hour, TariffBand};
//!
//! assert_eq!(classify_hour(8), TariffBand::F1);
//! assert_eq!(classify_hour(7), TariffBand::F2);
//! assert_eq!(classify_hour(24), TariffBand::F3);
//! ```

use serde::Serialize;
use std::fmt;

/// Time-of-use tariff band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TariffBand {
    /// Peak hours
    F1,
    /// Intermediate hours
    F2,
    /// Off-peak hours
    F3,
}

impl TariffBand {
    /// All bands in display order
    pub const ALL: [TariffBand; 3] = [TariffBand::F1, TariffBand::F2, TariffBand::F3];

    /// Band code ("F1", "F2", "F3")
    pub fn code(self) -> &'static str {
        match self {
            TariffBand::F1 => "F1",
            TariffBand::F2 => "F2",
            TariffBand::F3 => "F3",
        }
    }

    /// Display name shown in tooltips and legends
    pub fn display_name(self) -> &'static str {
        match self {
            TariffBand::F1 => "F1 - Punta",
            TariffBand::F2 => "F2 - Intermedia",
            TariffBand::F3 => "F3 - Fuori Punta",
        }
    }

    /// Bar color as a hex string
    pub fn color(self) -> &'static str {
        match self {
            TariffBand::F1 => "#EF4444",
            TariffBand::F2 => "#F59E0B",
            TariffBand::F3 => "#10B981",
        }
    }
}

impl fmt::Display for TariffBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Classify an hour of the day into its tariff band
///
/// Total over `u8`. Hours outside 1..=24 never reach this function from the
/// CSV importer (they are rejected at parse time); if they do, they fall
/// into F3.
pub fn classify_hour(hour: u8) -> TariffBand {
    match hour {
        8..=19 => TariffBand::F1,
        7 | 20..=23 => TariffBand::F2,
        _ => TariffBand::F3,
    }
}
