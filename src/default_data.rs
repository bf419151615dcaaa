//! Embedded sample dataset
//!
//! Shown until a CSV is imported: two full days in September 2025 plus a few
//! sparse hours in November 2024, January 2025 and March 2025, so the
//! calendar has several navigable months.

use crate::types::PriceRow;

/// Date selected on first load
pub const DEFAULT_SELECTED_DATE: &str = "20250917";

const SAMPLE_ROWS: [(&str, u8, f64); 64] = [
    ("20250917", 1, 106.17947),
    ("20250917", 2, 101.95056),
    ("20250917", 3, 93.25903),
    ("20250917", 4, 102.24588),
    ("20250917", 5, 94.96825),
    ("20250917", 6, 103.26841),
    ("20250917", 7, 115.04726),
    ("20250917", 8, 129.22),
    ("20250917", 9, 129.70613),
    ("20250917", 10, 124.15137),
    ("20250917", 11, 116.72992),
    ("20250917", 12, 105.92323),
    ("20250917", 13, 89.53855),
    ("20250917", 14, 88.10792),
    ("20250917", 15, 88.70702),
    ("20250917", 16, 92.31284),
    ("20250917", 17, 100.39173),
    ("20250917", 18, 107.35422),
    ("20250917", 19, 124.22),
    ("20250917", 20, 144.43699),
    ("20250917", 21, 136.93387),
    ("20250917", 22, 121.04465),
    ("20250917", 23, 108.51523),
    ("20250917", 24, 106.39141),
    ("20250918", 1, 109.61571),
    ("20250918", 2, 105.82947),
    ("20250918", 3, 103.9874),
    ("20250918", 4, 100.77691),
    ("20250918", 5, 100.65138),
    ("20250918", 6, 104.37091),
    ("20250918", 7, 117.12721),
    ("20250918", 8, 135.0),
    ("20250918", 9, 131.89),
    ("20250918", 10, 108.82283),
    ("20250918", 11, 108.33),
    ("20250918", 12, 95.73),
    ("20250918", 13, 80.64),
    ("20250918", 14, 79.23),
    ("20250918", 15, 86.28),
    ("20250918", 16, 95.73),
    ("20250918", 17, 108.4777),
    ("20250918", 18, 117.45166),
    ("20250918", 19, 128.97),
    ("20250918", 20, 174.0),
    ("20250918", 21, 146.83),
    ("20250918", 22, 120.3),
    ("20250918", 23, 115.0),
    ("20250918", 24, 110.91),
    ("20241101", 1, 95.50),
    ("20241101", 2, 90.25),
    ("20241101", 8, 125.30),
    ("20241101", 12, 110.75),
    ("20241101", 18, 140.20),
    ("20241101", 24, 100.15),
    ("20250115", 1, 88.30),
    ("20250115", 8, 118.45),
    ("20250115", 12, 105.60),
    ("20250115", 18, 135.80),
    ("20250115", 24, 95.25),
    ("20250320", 1, 92.70),
    ("20250320", 8, 122.90),
    ("20250320", 12, 108.40),
    ("20250320", 18, 138.60),
    ("20250320", 24, 98.85),
];

/// Build the default dataset in its embedded order
pub fn default_rows() -> Vec<PriceRow> {
    SAMPLE_ROWS
        .iter()
        .map(|(date, hour, price)| PriceRow::new(*date, *hour, *price))
        .collect()
}
