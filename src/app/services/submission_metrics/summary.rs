//! Summary statistics over submission metadata
//!
//! Status tallies, record estimates, the merged approved list shown to
//! reviewers, and the free-text search used by the dataset browser.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::app::models::{Submission, SubmissionStatus};
use crate::constants::CSV_ROW_SEPARATOR;

/// Number of submissions in each review status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub new: usize,
    pub total: usize,
}

impl StatusCounts {
    /// Count for one status
    pub fn get(&self, status: SubmissionStatus) -> usize {
        match status {
            SubmissionStatus::Pending => self.pending,
            SubmissionStatus::Approved => self.approved,
            SubmissionStatus::Rejected => self.rejected,
            SubmissionStatus::New => self.new,
        }
    }

    fn increment(&mut self, status: SubmissionStatus) {
        match status {
            SubmissionStatus::Pending => self.pending += 1,
            SubmissionStatus::Approved => self.approved += 1,
            SubmissionStatus::Rejected => self.rejected += 1,
            SubmissionStatus::New => self.new += 1,
        }
        self.total += 1;
    }
}

/// Tally submissions by status
pub fn status_counts(submissions: &[Submission]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for submission in submissions {
        counts.increment(submission.status);
    }
    counts
}

/// Estimated data rows in a CSV upload: line count minus the header
///
/// The text is not trimmed, so a trailing newline counts as a row.
pub fn estimate_record_count(csv_data: &str) -> usize {
    csv_data.split(CSV_ROW_SEPARATOR).count().saturating_sub(1)
}

/// Estimated data rows across submissions, optionally approved ones only
pub fn total_records(submissions: &[Submission], approved_only: bool) -> usize {
    submissions
        .iter()
        .filter(|s| !approved_only || s.status == SubmissionStatus::Approved)
        .map(|s| estimate_record_count(&s.csv_data))
        .sum()
}

/// Submissions belonging to one user
pub fn submissions_for_user<'a>(submissions: &'a [Submission], user_id: &str) -> Vec<&'a Submission> {
    submissions.iter().filter(|s| s.user_id == user_id).collect()
}

/// Combine active and archived approved submissions, newest first
///
/// Non-approved entries are dropped. Entries sharing an id are collapsed, the
/// one seen last winning; entries without an id are all kept.
pub fn merge_approved(active: Vec<Submission>, archived: Vec<Submission>) -> Vec<Submission> {
    let mut merged: Vec<Submission> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for submission in active.into_iter().chain(archived) {
        if submission.status != SubmissionStatus::Approved {
            continue;
        }

        match submission.id.clone() {
            Some(id) => match positions.get(&id) {
                Some(&position) => merged[position] = submission,
                None => {
                    positions.insert(id, merged.len());
                    merged.push(submission);
                }
            },
            None => merged.push(submission),
        }
    }

    merged.sort_by(|a, b| b.date.cmp(&a.date));
    debug!("Merged {} approved submissions", merged.len());
    merged
}

/// Case-insensitive search over name, description, submitter and CSV text
///
/// A blank term matches everything.
pub fn search_submissions<'a>(submissions: &'a [Submission], term: &str) -> Vec<&'a Submission> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return submissions.iter().collect();
    }

    submissions
        .iter()
        .filter(|s| {
            [&s.name, &s.description, &s.submitted_by, &s.csv_data]
                .iter()
                .any(|text| text.to_lowercase().contains(&needle))
        })
        .collect()
}
