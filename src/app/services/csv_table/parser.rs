//! Raw CSV text splitting
//!
//! Uploaded datasets are split naively: rows on newline, cells on comma.
//! Quoted fields and embedded delimiters are not supported.

use crate::constants::{CSV_CELL_SEPARATOR, CSV_ROW_SEPARATOR};
use serde::Serialize;
use tracing::debug;

/// Headers plus data rows of an uploaded dataset
///
/// Header cells are trimmed. Data cells are kept as written and trimmed when
/// parsed. Rows may be shorter or longer than the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawTable {
    /// Column headers in file order
    pub headers: Vec<String>,

    /// Data rows (header row excluded)
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Split raw dataset text into headers and rows
    ///
    /// Empty or whitespace-only text yields an empty table.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::default();
        }

        let mut lines = trimmed.split(CSV_ROW_SEPARATOR);
        let headers: Vec<String> = lines
            .next()
            .map(|line| {
                line.split(CSV_CELL_SEPARATOR)
                    .map(|cell| cell.trim().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let rows: Vec<Vec<String>> = lines
            .map(|line| line.split(CSV_CELL_SEPARATOR).map(str::to_string).collect())
            .collect();

        debug!(
            "Parsed table: {} columns, {} data rows",
            headers.len(),
            rows.len()
        );

        Self { headers, rows }
    }

    /// Get a cell, or `None` if the row is too short
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has neither headers nor rows
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// Headers plus at most `max_rows` leading data rows
    pub fn preview(&self, max_rows: usize) -> RawTable {
        RawTable {
            headers: self.headers.clone(),
            rows: self.rows.iter().take(max_rows).cloned().collect(),
        }
    }
}

/// First `max_lines` lines of raw dataset text, header included
///
/// This is the excerpt handed to the external summary service.
pub fn sample_lines(text: &str, max_lines: usize) -> String {
    text.split(CSV_ROW_SEPARATOR)
        .take(max_lines)
        .collect::<Vec<_>>()
        .join("\n")
}
