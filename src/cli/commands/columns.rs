//! Columns command: report the header chosen for each semantic field

use super::shared::{CommandSummary, csv_field, read_dataset, to_json, write_output};
use crate::Result;
use crate::app::services::csv_table::column_inference::ColumnEntry;
use crate::app::services::csv_table::{ColumnIndex, RawTable};
use crate::cli::args::{ColumnsArgs, OutputFormat};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;
use std::time::Instant;

/// Column inference result for one file
#[derive(Debug, Serialize)]
pub struct ColumnReport {
    pub file: String,
    pub headers: Vec<String>,
    pub columns: Vec<ColumnEntry>,
}

impl ColumnReport {
    /// Build a report from raw CSV text
    pub fn from_text(file: impl Into<String>, text: &str) -> Self {
        let table = RawTable::parse(text);
        let index = ColumnIndex::infer(&table.headers);
        Self {
            file: file.into(),
            columns: index.entries(),
            headers: table.headers,
        }
    }

    fn header_for(&self, entry: &ColumnEntry) -> Option<&str> {
        entry
            .column
            .and_then(|column| self.headers.get(column))
            .map(String::as_str)
    }

    /// Render the report in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => to_json(self),
            OutputFormat::Csv => {
                let mut out = String::from("field,column,header\n");
                for entry in &self.columns {
                    let column = entry.column.map(|c| c.to_string()).unwrap_or_default();
                    let header = self.header_for(entry).unwrap_or_default();
                    let _ = writeln!(out, "{},{},{}", entry.field, column, csv_field(header));
                }
                Ok(out)
            }
            OutputFormat::Human => {
                let mut out = String::new();
                let _ = writeln!(out, "{}", self.file.bold());
                for entry in &self.columns {
                    match (entry.column, self.header_for(entry)) {
                        (Some(column), Some(header)) => {
                            let _ = writeln!(
                                out,
                                "  {:<12} column {} ({})",
                                entry.field.name(),
                                column,
                                header.green()
                            );
                        }
                        _ => {
                            let _ = writeln!(
                                out,
                                "  {:<12} {}",
                                entry.field.name(),
                                "not found".yellow()
                            );
                        }
                    }
                }
                Ok(out)
            }
        }
    }
}

/// Run the columns command
pub async fn run_columns(args: ColumnsArgs) -> Result<CommandSummary> {
    let start_time = Instant::now();
    let text = read_dataset(&args.input).await?;

    let report = ColumnReport::from_text(args.input.display().to_string(), &text);
    write_output(&report.render(args.output_format)?, None)?;

    Ok(CommandSummary {
        files_processed: 1,
        rows_processed: RawTable::parse(&text).row_count(),
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}
