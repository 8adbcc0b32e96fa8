//! Sample command: leading lines or a parsed preview of a dataset

use super::shared::{CommandSummary, load_configuration, read_dataset, to_json, write_output};
use crate::Result;
use crate::app::services::csv_table::RawTable;
use crate::app::services::dataset_analyzer::DatasetAnalyzer;
use crate::cli::args::{OutputFormat, SampleArgs};
use crate::constants::{CSV_CELL_SEPARATOR, CSV_ROW_SEPARATOR};
use colored::Colorize;
use serde_json::json;
use std::fmt::Write as _;
use std::time::Instant;

/// Run the sample command
pub async fn run_sample(args: SampleArgs) -> Result<CommandSummary> {
    let start_time = Instant::now();
    let config = load_configuration(args.config_file.as_deref(), None).await?;
    let analyzer = DatasetAnalyzer::new(config);

    let text = read_dataset(&args.input).await?;
    let rendered = if args.preview {
        render_preview(&analyzer.preview(&text), args.output_format)?
    } else {
        render_sample(&analyzer.sample(&text), args.output_format)?
    };
    write_output(&rendered, None)?;

    Ok(CommandSummary {
        files_processed: 1,
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}

/// Render raw leading lines
pub fn render_sample(sample: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&json!({ "sample": sample })),
        OutputFormat::Csv | OutputFormat::Human => Ok(with_newline(sample.to_string())),
    }
}

/// Render a header-plus-rows preview
pub fn render_preview(preview: &RawTable, format: OutputFormat) -> Result<String> {
    let separator = CSV_CELL_SEPARATOR.to_string();
    match format {
        OutputFormat::Json => to_json(preview),
        OutputFormat::Csv => {
            let lines: Vec<String> = std::iter::once(preview.headers.join(&separator))
                .chain(preview.rows.iter().map(|row| row.join(&separator)))
                .collect();
            Ok(with_newline(lines.join(&CSV_ROW_SEPARATOR.to_string())))
        }
        OutputFormat::Human => {
            let mut out = String::new();
            let _ = writeln!(out, "{}", preview.headers.join(" | ").bold());
            for row in &preview.rows {
                let cells: Vec<&str> = row.iter().map(|cell| cell.trim()).collect();
                let _ = writeln!(out, "{}", cells.join(" | "));
            }
            let _ = writeln!(out, "({} rows shown)", preview.row_count());
            Ok(out)
        }
    }
}

fn with_newline(mut text: String) -> String {
    if !text.ends_with(CSV_ROW_SEPARATOR) {
        text.push(CSV_ROW_SEPARATOR);
    }
    text
}
