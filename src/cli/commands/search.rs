//! Search command: find submissions across one or more exports

use super::shared::{CommandSummary, csv_field, to_json, write_output};
use super::trends::colorize_status;
use crate::Result;
use crate::app::models::Submission;
use crate::app::services::submission_metrics::{
    estimate_record_count, merge_approved, search_submissions,
};
use crate::app::services::submission_store::load_sources;
use crate::cli::args::{OutputFormat, SearchArgs};
use colored::Colorize;
use std::fmt::Write as _;
use std::time::Instant;
use tracing::{debug, info};

/// Run the search command
pub async fn run_search(args: SearchArgs) -> Result<CommandSummary> {
    let start_time = Instant::now();

    let sources = load_sources(&args.submissions).await?;
    let loaded: usize = sources.iter().map(Vec::len).sum();

    let pool = if args.approved {
        approved_listing(sources)
    } else {
        let mut all: Vec<Submission> = sources.into_iter().flatten().collect();
        if let Some(status) = args.status {
            all.retain(|s| s.status == status);
        }
        all
    };
    debug!("Searching {} candidate submissions", pool.len());

    let matches = search_submissions(&pool, &args.term);
    info!("{} submissions match '{}'", matches.len(), args.term.trim());

    write_output(&render_matches(&matches, args.output_format)?, None)?;

    Ok(CommandSummary {
        submissions_loaded: loaded,
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}

/// The first export is the active collection, the rest are archives
fn approved_listing(sources: Vec<Vec<Submission>>) -> Vec<Submission> {
    let mut sources = sources.into_iter();
    let active = sources.next().unwrap_or_default();
    let archived: Vec<Submission> = sources.flatten().collect();
    merge_approved(active, archived)
}

/// Render matching submissions in the requested format
pub fn render_matches(matches: &[&Submission], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&matches),
        OutputFormat::Csv => {
            let mut out = String::from("id,name,status,submitted_by,date,records\n");
            for submission in matches {
                let _ = writeln!(
                    out,
                    "{},{},{},{},{},{}",
                    csv_field(submission.id.as_deref().unwrap_or_default()),
                    csv_field(&submission.name),
                    submission.status,
                    csv_field(&submission.submitted_by),
                    submission.date.to_rfc3339(),
                    estimate_record_count(&submission.csv_data)
                );
            }
            Ok(out)
        }
        OutputFormat::Human => {
            let mut out = String::new();
            if matches.is_empty() {
                let _ = writeln!(out, "{}", "No matching submissions".yellow());
                return Ok(out);
            }
            for submission in matches {
                let _ = writeln!(
                    out,
                    "{} [{}]",
                    submission.name.bold(),
                    colorize_status(submission.status, submission.status.as_str())
                );
                let _ = writeln!(
                    out,
                    "  by {} on {} | ~{} records",
                    submission.submitted_by,
                    submission.date.format("%Y-%m-%d"),
                    estimate_record_count(&submission.csv_data)
                );
                if !submission.description.is_empty() {
                    let _ = writeln!(out, "  {}", submission.description);
                }
            }
            Ok(out)
        }
    }
}
