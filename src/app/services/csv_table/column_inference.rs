//! Column inference from free-text headers
//!
//! Each semantic field is located by lower-casing the headers and taking the
//! first one (left to right) that contains the field's needle. Matching is
//! coarse on purpose: "temp" also hits "temperature_anomaly" and "wind" also
//! hits "windy_conditions_notes".

use crate::app::models::SemanticField;
use serde::Serialize;
use tracing::debug;

/// Column position of each semantic field, or `None` if no header matched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    slots: [Option<usize>; SemanticField::COUNT],
}

impl ColumnIndex {
    /// Infer column positions from a header row
    pub fn infer<S: AsRef<str>>(headers: &[S]) -> Self {
        let lowered: Vec<String> = headers
            .iter()
            .map(|header| header.as_ref().to_lowercase())
            .collect();

        let mut index = Self::default();
        for field in SemanticField::ALL {
            let position = lowered
                .iter()
                .position(|header| header.contains(field.needle()));

            match position {
                Some(column) => debug!(
                    "Column {} ('{}') mapped to {}",
                    column,
                    headers[column].as_ref(),
                    field
                ),
                None => debug!("No column found for {}", field),
            }

            index.slots[field.slot()] = position;
        }

        index
    }

    /// Column position for a field
    pub fn get(&self, field: SemanticField) -> Option<usize> {
        self.slots[field.slot()]
    }

    /// Check if a field was found
    pub fn has(&self, field: SemanticField) -> bool {
        self.get(field).is_some()
    }

    /// Check if both coordinate columns were found
    pub fn has_coordinates(&self) -> bool {
        self.has(SemanticField::Latitude) && self.has(SemanticField::Longitude)
    }

    /// Measurement fields that were found, with their columns
    pub fn measurement_columns(&self) -> impl Iterator<Item = (SemanticField, usize)> + '_ {
        SemanticField::MEASUREMENTS
            .into_iter()
            .filter_map(|field| self.get(field).map(|column| (field, column)))
    }

    /// Field/column pairs for reporting, absent fields included
    pub fn entries(&self) -> Vec<ColumnEntry> {
        SemanticField::ALL
            .into_iter()
            .map(|field| ColumnEntry {
                field,
                column: self.get(field),
            })
            .collect()
    }
}

/// One row of a column inference report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnEntry {
    pub field: SemanticField,
    pub column: Option<usize>,
}
