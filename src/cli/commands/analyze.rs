//! Analyze command: CSV datasets to locations and a per-day series

use super::shared::{
    CommandSummary, create_progress_bar, csv_field, format_value, load_configuration,
    read_dataset, resolve_inputs, to_json, write_output,
};
use crate::app::models::AggregatedParameterPoint;
use crate::app::services::dataset_analyzer::{CombinedAnalysis, DatasetAnalysis, DatasetAnalyzer};
use crate::cli::args::{AnalyzeArgs, OutputFormat};
use crate::Result;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// Label used for the file column of pooled output
const COMBINED_LABEL: &str = "combined";

/// Analysis of one input file
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub analysis: DatasetAnalysis,
}

/// Run the analyze command
pub async fn run_analyze(args: AnalyzeArgs) -> Result<CommandSummary> {
    let start_time = Instant::now();
    args.validate()?;

    let config = load_configuration(args.config_file.as_deref(), args.max_points).await?;
    let analyzer = DatasetAnalyzer::new(config);
    let files = resolve_inputs(&args.inputs)?;

    let texts = read_all(&files, args.logging.show_progress()).await?;

    let mut summary = CommandSummary {
        files_processed: files.len(),
        ..Default::default()
    };

    let rendered = if args.combined {
        let combined = analyzer.analyze_many(texts.iter().map(String::as_str));
        summary.rows_processed = combined.stats.total_rows;
        render_combined(&combined, args.output_format)?
    } else {
        let reports: Vec<FileReport> = files
            .iter()
            .zip(&texts)
            .map(|(path, text)| {
                let analysis = analyzer.analyze(text);
                if analysis.has_no_data() {
                    warn!("{} produced no chartable data", path.display());
                }
                FileReport {
                    file: path.display().to_string(),
                    analysis,
                }
            })
            .collect();
        summary.rows_processed = reports.iter().map(|r| r.analysis.row_count).sum();
        render_reports(&reports, args.output_format)?
    };

    write_output(&rendered, args.output_file.as_deref())?;

    summary.processing_time = start_time.elapsed();
    info!(
        "Analyzed {} files ({} rows) in {:.2?}",
        summary.files_processed, summary.rows_processed, summary.processing_time
    );
    Ok(summary)
}

async fn read_all(files: &[PathBuf], show_progress: bool) -> Result<Vec<String>> {
    let progress = show_progress.then(|| create_progress_bar(files.len() as u64, "Reading datasets"));

    let mut texts = Vec::with_capacity(files.len());
    for path in files {
        texts.push(read_dataset(path).await?);
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    Ok(texts)
}

/// Render per-file reports in the requested format
pub fn render_reports(reports: &[FileReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&reports),
        OutputFormat::Csv => {
            let mut out = series_csv_header();
            for report in reports {
                push_series_rows(&mut out, &report.file, &report.analysis.series);
            }
            Ok(out)
        }
        OutputFormat::Human => {
            let mut out = String::new();
            for report in reports {
                render_human_file(&mut out, report);
            }
            Ok(out)
        }
    }
}

/// Render a pooled analysis in the requested format
pub fn render_combined(combined: &CombinedAnalysis, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(combined),
        OutputFormat::Csv => {
            let mut out = series_csv_header();
            push_series_rows(&mut out, COMBINED_LABEL, &combined.series);
            Ok(out)
        }
        OutputFormat::Human => {
            let mut out = String::new();
            let _ = writeln!(
                out,
                "{} {}",
                "Combined analysis of".bold(),
                format!("{} datasets", combined.datasets).bold()
            );
            let _ = writeln!(
                out,
                "  Rows: {}  Locations: {}  Series points: {}  Yield: {:.1}%",
                combined.stats.total_rows,
                combined.locations.len(),
                combined.series.len(),
                combined.stats.parameter_yield()
            );
            push_series_table(&mut out, &combined.series);
            Ok(out)
        }
    }
}

fn render_human_file(out: &mut String, report: &FileReport) {
    let analysis = &report.analysis;
    let _ = writeln!(out, "{}", report.file.bold());
    let _ = writeln!(
        out,
        "  Rows: {}  Locations: {}  Series points: {}  Yield: {:.1}%",
        analysis.row_count,
        analysis.locations.len(),
        analysis.series.len(),
        analysis.stats.parameter_yield()
    );

    let found: Vec<String> = analysis
        .columns
        .iter()
        .filter_map(|entry| {
            let column = entry.column?;
            let header = analysis.headers.get(column)?;
            Some(format!("{}={}", entry.field, header))
        })
        .collect();
    if found.is_empty() {
        let _ = writeln!(out, "  Columns: {}", "none recognised".yellow());
    } else {
        let _ = writeln!(out, "  Columns: {}", found.join(", "));
    }

    let skipped = analysis.stats.rows_with_bad_date + analysis.stats.rows_without_measurements;
    if skipped > 0 {
        let _ = writeln!(
            out,
            "  {}",
            format!(
                "Skipped {} rows ({} bad dates, {} without measurements)",
                skipped,
                analysis.stats.rows_with_bad_date,
                analysis.stats.rows_without_measurements
            )
            .yellow()
        );
    }

    push_series_table(out, &analysis.series);
    out.push('\n');
}

fn push_series_table(out: &mut String, series: &[AggregatedParameterPoint]) {
    if series.is_empty() {
        return;
    }

    let _ = writeln!(
        out,
        "  {:<8} {:>12} {:>10} {:>10}",
        "Date".cyan(),
        "Temperature".cyan(),
        "Salinity".cyan(),
        "Wind".cyan()
    );
    for point in series {
        let _ = writeln!(
            out,
            "  {:<8} {:>12} {:>10} {:>10}",
            point.date,
            dash_if_empty(format_value(point.temperature)),
            dash_if_empty(format_value(point.salinity)),
            dash_if_empty(format_value(point.wind_speed))
        );
    }
}

fn dash_if_empty(value: String) -> String {
    if value.is_empty() { "-".to_string() } else { value }
}

fn series_csv_header() -> String {
    "file,date,temperature,salinity,wind_speed\n".to_string()
}

fn push_series_rows(out: &mut String, file: &str, series: &[AggregatedParameterPoint]) {
    let file = csv_field(file);
    for point in series {
        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            file,
            csv_field(&point.date),
            format_value(point.temperature),
            format_value(point.salinity),
            format_value(point.wind_speed)
        );
    }
}
