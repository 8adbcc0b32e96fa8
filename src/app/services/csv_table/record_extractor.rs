//! Row-level record extraction for uploaded datasets
//!
//! Each row is handled independently: a row can yield a location, a
//! parameter record, both or neither. Failures are counted and logged at
//! debug level, never propagated.

use tracing::debug;

use super::column_inference::ColumnIndex;
use super::field_parsers::{parse_date_label, parse_float};
use super::parser::RawTable;
use super::stats::{ExtractionResult, ExtractionStats};
use crate::app::models::{LocationPoint, ParameterRecord, SemanticField};

/// Why a row produced no parameter record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The table has no date column at all
    NoDateColumn,
    /// The row is too short to reach the date column
    MissingDate,
    /// The date cell did not parse as a calendar date
    UnparsableDate,
    /// The date parsed but no measurement did
    NoMeasurements,
}

/// Extract location points and parameter records from every data row
pub fn extract_records(table: &RawTable, index: &ColumnIndex) -> ExtractionResult {
    let mut stats = ExtractionStats::new();
    let mut locations = Vec::new();
    let mut parameters = Vec::new();
    let has_coordinates = index.has_coordinates();

    for (row_number, row) in table.rows.iter().enumerate() {
        stats.total_rows += 1;

        if has_coordinates {
            match extract_location(row, index) {
                Some(point) => {
                    locations.push(point);
                    stats.locations_extracted += 1;
                }
                None => {
                    stats.rows_without_location += 1;
                    debug!("Row {}: no valid coordinate pair", row_number + 1);
                }
            }
        }

        match extract_parameters(row, index) {
            Ok(record) => {
                parameters.push(record);
                stats.parameters_extracted += 1;
            }
            Err(reason) => {
                if reason != SkipReason::NoDateColumn {
                    debug!("Row {}: parameters skipped ({:?})", row_number + 1, reason);
                }
                stats.record_skip(reason);
            }
        }
    }

    ExtractionResult {
        locations,
        parameters,
        stats,
    }
}

/// Build a location point if both coordinate cells parse as finite numbers
pub fn extract_location<S: AsRef<str>>(row: &[S], index: &ColumnIndex) -> Option<LocationPoint> {
    let latitude = numeric_cell(row, index.get(SemanticField::Latitude)?)?;
    let longitude = numeric_cell(row, index.get(SemanticField::Longitude)?)?;
    LocationPoint::new(latitude, longitude)
}

/// Build a parameter record from the date column and any parsable measurements
pub fn extract_parameters<S: AsRef<str>>(
    row: &[S],
    index: &ColumnIndex,
) -> Result<ParameterRecord, SkipReason> {
    let date_column = index
        .get(SemanticField::Date)
        .ok_or(SkipReason::NoDateColumn)?;
    let date_cell = row.get(date_column).ok_or(SkipReason::MissingDate)?;
    let label = parse_date_label(date_cell.as_ref()).ok_or(SkipReason::UnparsableDate)?;

    let mut record = ParameterRecord::new(label);
    for (field, column) in index.measurement_columns() {
        if let Some(value) = numeric_cell(row, column) {
            record.set(field, value);
        }
    }

    if record.has_measurements() {
        Ok(record)
    } else {
        Err(SkipReason::NoMeasurements)
    }
}

fn numeric_cell<S: AsRef<str>>(row: &[S], column: usize) -> Option<f64> {
    row.get(column).and_then(|cell| parse_float(cell.as_ref()))
}
