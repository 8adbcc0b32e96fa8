//! Test utilities for submission metrics
//!
//! Builders for submission metadata shared by the test modules.

use chrono::{DateTime, Utc};

use crate::app::models::{Submission, SubmissionStatus};


/// Parse an RFC 3339 timestamp for tests
pub fn at(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .unwrap()
        .with_timezone(&Utc)
}

/// Helper to create a submission with the given id, timestamp and status
pub fn submission(id: &str, timestamp: &str, status: SubmissionStatus) -> Submission {
    Submission {
        id: Some(id.to_string()),
        name: format!("Dataset {id}"),
        description: "Coastal CTD casts".to_string(),
        csv_data: "date,temp\n2025-08-01,27.5\n2025-08-02,27.9".to_string(),
        submitted_by: "A. Researcher".to_string(),
        date: at(timestamp),
        user_id: "user-1".to_string(),
        status,
    }
}
