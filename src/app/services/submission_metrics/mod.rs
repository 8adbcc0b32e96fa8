//! Metrics computed over submission metadata
//!
//! These helpers back the dashboard's trend chart and summary widgets. They
//! work on submission metadata only; CSV content is touched just to estimate
//! record counts and for text search.
//!
//! - [`monthly_counter`] - Trailing 12-month submission trend
//! - [`summary`] - Status counts, record estimates, merging and search

pub mod monthly_counter;
pub mod summary;

#[cfg(test)]
mod tests;

pub use monthly_counter::{monthly_counts_for_dates, monthly_submission_counts};
pub use summary::{
    StatusCounts, estimate_record_count, merge_approved, search_submissions, status_counts,
    submissions_for_user, total_records,
};
