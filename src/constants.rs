//! Application constants for the CMLRE ingestion pipeline
//!
//! This module contains the header needles, date formats, window sizes and
//! other default values used throughout the pipeline and CLI.

// =============================================================================
// CSV Layout
// =============================================================================

/// Row separator for uploaded dataset text
pub const CSV_ROW_SEPARATOR: char = '\n';

/// Cell separator for uploaded dataset text (no quoting support)
pub const CSV_CELL_SEPARATOR: char = ',';

/// File extension picked up when scanning input directories
pub const CSV_FILE_EXTENSION: &str = "csv";

// =============================================================================
// Column Inference
// =============================================================================

/// Lower-case header substrings used to locate each semantic field
pub mod needles {
    pub const LATITUDE: &str = "lat";
    pub const LONGITUDE: &str = "lon";
    pub const DATE: &str = "date";
    pub const TEMPERATURE: &str = "temp";
    pub const SALINITY: &str = "salinity";
    pub const WIND_SPEED: &str = "wind";
}

// =============================================================================
// Dates
// =============================================================================

/// Calendar date forms accepted in a dataset's date column, tried in order
pub const ACCEPTED_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", // 2025-08-02
    "%m/%d/%y", // 8/2/25, must precede both %Y slash forms
    "%m/%d/%Y", // 8/2/2025
    "%Y/%m/%d", // 2025/08/02
    "%d-%b-%Y", // 02-Aug-2025
];

/// Date-time forms accepted when the date cell carries an inline time
pub const ACCEPTED_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Chart label format for a parameter reading ("Aug 2")
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d";

/// Leap year used to compare year-less display labels (keeps "Feb 29" valid)
pub const DISPLAY_REFERENCE_YEAR: i32 = 2000;

/// Month bin key format for submission trends ("Aug 25")
pub const MONTH_KEY_FORMAT: &str = "%b %y";

// =============================================================================
// Resource Bounds and Defaults
// =============================================================================

/// Maximum number of aggregated points kept for a chart series
pub const DEFAULT_MAX_SERIES_POINTS: usize = 100;

/// Number of months covered by the submission trend window (current included)
pub const TREND_WINDOW_MONTHS: u32 = 12;

/// Lines of CSV text handed to the external summary service
pub const DEFAULT_SAMPLE_LINES: usize = 100;

/// Data rows shown in a dataset preview
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

// =============================================================================
// Configuration Files
// =============================================================================

/// Directory under the platform config dir holding the config file
pub const CONFIG_DIR_NAME: &str = "cmlre-ingest";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Log target used by the default tracing filter
pub const LOG_TARGET: &str = "cmlre_ingest";
