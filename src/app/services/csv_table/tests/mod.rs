//! Test utilities for CSV table parsing and extraction
//!
//! This module provides sample dataset text shared by the test modules.


/// Dataset with two same-day readings and one malformed row
pub const SAME_DAY_CSV: &str =
    "lat,lon,date,temp\n10.5,20.3,2025-08-02 00:00,27.5\n10.6,20.4,2025-08-02 06:00,27.9\nbad,row\n";

/// Helper to create a physical oceanography export with several parameters
pub fn create_physical_csv() -> String {
    r#"Date,Latitude,Longitude,Temperature (C),Salinity (PSU),Wind Speed (m/s)
2025-08-01,10.8975,72.2076,27.53,34.68,0.2
2025-08-02,10.5217,72.1706,28,34.58,0.48
2025-08-03,10.353,72.5702,28.19,,0.58
2025-08-03,10.8975,72.2076,27.49,34.6,
not-a-date,10.5217,72.1706,27.39,34.59,0.47"#
        .to_string()
}

/// Assert two floats are equal within a small tolerance
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
