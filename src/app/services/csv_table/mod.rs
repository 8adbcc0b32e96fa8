//! CSV table parsing and record extraction for uploaded datasets
//!
//! Uploaded datasets are plain comma-separated text with a free-text header
//! row. This module turns that text into point records the aggregator and
//! chart layers consume, degrading gracefully on heterogeneous uploads.
//!
//! ## Architecture
//!
//! - [`parser`] - Splits raw text into a [`RawTable`] of headers and rows
//! - [`column_inference`] - Maps semantic fields to columns by header substring
//! - [`field_parsers`] - Lenient number and date parsing for single cells
//! - [`record_extractor`] - Walks rows and builds location and parameter records
//! - [`stats`] - Extraction statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use cmlre_ingest::app::services::csv_table::{ColumnIndex, RawTable, extract_records};
//!
//! let table = RawTable::parse("lat,lon,date,temp\n10.5,20.3,2025-08-02 00:00,27.5");
//! let index = ColumnIndex::infer(&table.headers);
//! let result = extract_records(&table, &index);
//!
//! assert_eq!(result.locations.len(), 1);
//! assert_eq!(result.parameters[0].date, "Aug 2");
//! ```

pub mod column_inference;
pub mod field_parsers;
pub mod parser;
pub mod record_extractor;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_inference::ColumnIndex;
pub use parser::RawTable;
pub use record_extractor::{SkipReason, extract_records};
pub use stats::{ExtractionResult, ExtractionStats};
