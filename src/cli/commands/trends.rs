//! Trends command: monthly submission trend and dashboard summary

use super::shared::{CommandSummary, to_json, write_output};
use crate::Result;
use crate::app::models::{MonthlySubmissionCount, Submission, SubmissionStatus};
use crate::app::services::submission_metrics::{
    StatusCounts, monthly_submission_counts, status_counts, submissions_for_user, total_records,
};
use crate::app::services::submission_store::load_all;
use crate::cli::args::{OutputFormat, TrendsArgs};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;
use std::time::Instant;
use tracing::info;

const BAR_GLYPH: &str = "#";

/// Dashboard summary over a set of submissions
#[derive(Debug, Clone, Serialize)]
pub struct TrendsReport {
    pub reference_time: DateTime<Utc>,
    pub submissions: usize,
    pub monthly: Vec<MonthlySubmissionCount>,
    pub status: StatusCounts,
    pub total_records: usize,
    pub approved_records: usize,
}

impl TrendsReport {
    /// Summarise submissions relative to a reference instant
    pub fn build(submissions: &[Submission], now: DateTime<Utc>) -> Self {
        Self {
            reference_time: now,
            submissions: submissions.len(),
            monthly: monthly_submission_counts(submissions, now),
            status: status_counts(submissions),
            total_records: total_records(submissions, false),
            approved_records: total_records(submissions, true),
        }
    }

    /// Render the report in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => to_json(self),
            OutputFormat::Csv => {
                let mut out = String::from("month,submissions\n");
                for bin in &self.monthly {
                    let _ = writeln!(out, "{},{}", bin.month, bin.submissions);
                }
                Ok(out)
            }
            OutputFormat::Human => Ok(self.render_human()),
        }
    }

    fn render_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} (to {})",
            "Submissions over the last 12 months".bold(),
            self.reference_time.format("%Y-%m-%d")
        );

        for bin in &self.monthly {
            let _ = writeln!(
                out,
                "  {:<7} {:>4} {}",
                bin.month,
                bin.submissions,
                BAR_GLYPH.repeat(bin.submissions as usize).cyan()
            );
        }

        let _ = writeln!(out, "\n{}", "Status".bold());
        for status in SubmissionStatus::ALL {
            let label = format!("{:<9}", status.as_str());
            let _ = writeln!(out, "  {} {:>4}", colorize_status(status, &label), self.status.get(status));
        }
        let _ = writeln!(out, "  {:<9} {:>4}", "total", self.status.total);

        let _ = writeln!(
            out,
            "\nEstimated records: {} ({} approved)",
            self.total_records, self.approved_records
        );
        out
    }
}

/// Colour a label by review status
pub fn colorize_status(status: SubmissionStatus, label: &str) -> colored::ColoredString {
    match status {
        SubmissionStatus::Pending => label.yellow(),
        SubmissionStatus::Approved => label.green(),
        SubmissionStatus::Rejected => label.red(),
        SubmissionStatus::New => label.cyan(),
    }
}

/// Run the trends command
pub async fn run_trends(args: TrendsArgs) -> Result<CommandSummary> {
    let start_time = Instant::now();
    let now = args.reference_time()?;

    let all = load_all(&args.submissions).await?;
    let loaded = all.len();

    let submissions: Vec<Submission> = match &args.user {
        Some(user_id) => submissions_for_user(&all, user_id).into_iter().cloned().collect(),
        None => all,
    };
    info!(
        "Summarising {} of {} submissions",
        submissions.len(),
        loaded
    );

    let report = TrendsReport::build(&submissions, now);
    write_output(&report.render(args.output_format)?, None)?;

    Ok(CommandSummary {
        submissions_loaded: loaded,
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}
