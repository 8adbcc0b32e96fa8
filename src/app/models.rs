//! Data models for dataset ingestion and submission metrics
//!
//! This module contains the structures flowing through the pipeline: the
//! semantic fields inferred from headers, the point records extracted from
//! rows, the aggregated chart series, and the submission metadata supplied by
//! the external document store.

use crate::constants::needles;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Semantic Fields
// =============================================================================

/// A logical measurement inferred from a free-text column header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticField {
    Latitude,
    Longitude,
    Date,
    Temperature,
    Salinity,
    WindSpeed,
}

impl SemanticField {
    /// Number of semantic fields
    pub const COUNT: usize = 6;

    /// All fields, in inference order
    pub const ALL: [SemanticField; Self::COUNT] = [
        SemanticField::Latitude,
        SemanticField::Longitude,
        SemanticField::Date,
        SemanticField::Temperature,
        SemanticField::Salinity,
        SemanticField::WindSpeed,
    ];

    /// Fields averaged by the aggregator
    pub const MEASUREMENTS: [SemanticField; 3] = [
        SemanticField::Temperature,
        SemanticField::Salinity,
        SemanticField::WindSpeed,
    ];

    /// Lower-case substring a header must contain to map to this field
    pub fn needle(&self) -> &'static str {
        match self {
            SemanticField::Latitude => needles::LATITUDE,
            SemanticField::Longitude => needles::LONGITUDE,
            SemanticField::Date => needles::DATE,
            SemanticField::Temperature => needles::TEMPERATURE,
            SemanticField::Salinity => needles::SALINITY,
            SemanticField::WindSpeed => needles::WIND_SPEED,
        }
    }

    /// Stable snake_case name used in reports
    pub fn name(&self) -> &'static str {
        match self {
            SemanticField::Latitude => "latitude",
            SemanticField::Longitude => "longitude",
            SemanticField::Date => "date",
            SemanticField::Temperature => "temperature",
            SemanticField::Salinity => "salinity",
            SemanticField::WindSpeed => "wind_speed",
        }
    }

    /// Position of this field in [`SemanticField::ALL`]
    pub(crate) fn slot(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for SemanticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Extracted Records
// =============================================================================

/// A sampling location taken from a dataset row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationPoint {
    /// Build a point, rejecting non-finite coordinates
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        (latitude.is_finite() && longitude.is_finite()).then_some(Self {
            latitude,
            longitude,
        })
    }
}

/// Dated measurement readings taken from a single dataset row
///
/// `date` is the chart label ("Aug 2"); it carries no year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRecord {
    pub date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub salinity: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
}

impl ParameterRecord {
    /// Create a record with a date label and no readings yet
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            temperature: None,
            salinity: None,
            wind_speed: None,
        }
    }

    /// Get the reading for a measurement field
    pub fn get(&self, field: SemanticField) -> Option<f64> {
        match field {
            SemanticField::Temperature => self.temperature,
            SemanticField::Salinity => self.salinity,
            SemanticField::WindSpeed => self.wind_speed,
            _ => None,
        }
    }

    /// Set the reading for a measurement field; non-measurement fields are ignored
    pub fn set(&mut self, field: SemanticField, value: f64) {
        match field {
            SemanticField::Temperature => self.temperature = Some(value),
            SemanticField::Salinity => self.salinity = Some(value),
            SemanticField::WindSpeed => self.wind_speed = Some(value),
            _ => {}
        }
    }

    /// Check whether at least one measurement is present
    pub fn has_measurements(&self) -> bool {
        SemanticField::MEASUREMENTS
            .iter()
            .any(|field| self.get(*field).is_some())
    }
}

/// One chart point per distinct date, each field the mean of its readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedParameterPoint {
    pub date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub salinity: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
}

impl AggregatedParameterPoint {
    /// Get the averaged value for a measurement field
    pub fn get(&self, field: SemanticField) -> Option<f64> {
        match field {
            SemanticField::Temperature => self.temperature,
            SemanticField::Salinity => self.salinity,
            SemanticField::WindSpeed => self.wind_speed,
            _ => None,
        }
    }
}

impl From<AggregatedParameterPoint> for ParameterRecord {
    fn from(point: AggregatedParameterPoint) -> Self {
        Self {
            date: point.date,
            temperature: point.temperature,
            salinity: point.salinity,
            wind_speed: point.wind_speed,
        }
    }
}

/// Submission count for one month bin of the trend window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySubmissionCount {
    /// Bin key, e.g. "Aug 25"
    pub month: String,
    pub submissions: u32,
}

// =============================================================================
// Submission Metadata
// =============================================================================

/// Review status of a submitted dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
    New,
}

impl SubmissionStatus {
    /// All statuses, in report order
    pub const ALL: [SubmissionStatus; 4] = [
        SubmissionStatus::Pending,
        SubmissionStatus::Approved,
        SubmissionStatus::Rejected,
        SubmissionStatus::New,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
            SubmissionStatus::New => "new",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(SubmissionStatus::Pending),
            "approved" => Ok(SubmissionStatus::Approved),
            "rejected" => Ok(SubmissionStatus::Rejected),
            "new" => Ok(SubmissionStatus::New),
            other => Err(Error::invalid_arguments(format!(
                "Unknown submission status '{}' (expected pending, approved, rejected or new)",
                other
            ))),
        }
    }
}

/// A dataset submission as stored by the external document store
///
/// Field names follow the store's camelCase JSON so exports load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Raw uploaded CSV text
    #[serde(default)]
    pub csv_data: String,

    pub submitted_by: String,

    /// Submission timestamp
    pub date: DateTime<Utc>,

    #[serde(default)]
    pub user_id: String,

    pub status: SubmissionStatus,
}
