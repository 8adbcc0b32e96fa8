//! Extraction statistics and result structures for dataset rows
//!
//! This module provides types for tracking how many rows produced records and
//! why the others were skipped, and for handing extracted records downstream.

use super::record_extractor::SkipReason;
use crate::app::models::{LocationPoint, ParameterRecord};
use serde::{Deserialize, Serialize};

/// Extracted records with basic statistics
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    /// Location points in input row order
    pub locations: Vec<LocationPoint>,

    /// Dated parameter readings in input row order
    pub parameters: Vec<ParameterRecord>,

    /// Basic extraction statistics
    pub stats: ExtractionStats,
}

/// Simple extraction statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Total number of data rows encountered
    pub total_rows: usize,

    /// Rows that produced a location point
    pub locations_extracted: usize,

    /// Rows that produced a parameter record
    pub parameters_extracted: usize,

    /// Rows without a usable coordinate pair (only counted when both columns exist)
    pub rows_without_location: usize,

    /// Rows whose date cell was missing or unparsable
    pub rows_with_bad_date: usize,

    /// Rows with a valid date but no parsable measurement
    pub rows_without_measurements: usize,
}

impl ExtractionStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a parameter skip
    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::NoDateColumn => {}
            SkipReason::MissingDate | SkipReason::UnparsableDate => self.rows_with_bad_date += 1,
            SkipReason::NoMeasurements => self.rows_without_measurements += 1,
        }
    }

    /// Add another dataset's statistics to these
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.total_rows += other.total_rows;
        self.locations_extracted += other.locations_extracted;
        self.parameters_extracted += other.parameters_extracted;
        self.rows_without_location += other.rows_without_location;
        self.rows_with_bad_date += other.rows_with_bad_date;
        self.rows_without_measurements += other.rows_without_measurements;
    }

    /// Share of rows that produced a parameter record, as a percentage
    pub fn parameter_yield(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.parameters_extracted as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// Check if nothing at all was extracted
    pub fn is_empty(&self) -> bool {
        self.locations_extracted == 0 && self.parameters_extracted == 0
    }
}
