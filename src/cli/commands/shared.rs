//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! multiple CLI command implementations.

use crate::cli::args::LoggingArgs;
use crate::config::PipelineConfig;
use crate::constants::{CSV_FILE_EXTENSION, LOG_TARGET};
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Processing statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct CommandSummary {
    /// Number of CSV files read
    pub files_processed: usize,
    /// Number of data rows seen across those files
    pub rows_processed: usize,
    /// Number of submissions loaded from exports
    pub submissions_loaded: usize,
    /// Total processing time
    pub processing_time: Duration,
}

/// Set up structured logging to stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags. A subscriber that is
/// already installed is left in place.
pub fn setup_logging(logging: &LoggingArgs) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = logging.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    let result = if logging.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if result.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

/// Load the pipeline configuration and apply CLI overrides
pub async fn load_configuration(
    config_file: Option<&Path>,
    max_points: Option<usize>,
) -> Result<PipelineConfig> {
    let mut config = PipelineConfig::load(config_file).await?;

    if let Some(max_points) = max_points {
        config = config.with_max_series_points(max_points);
    }

    config.validate()?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Resolve CLI inputs into a list of CSV files
///
/// Each input may be a file, a directory (searched recursively for `.csv`
/// files) or a glob pattern. Files are returned in input order, directory and
/// glob matches sorted, duplicates dropped.
pub fn resolve_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for input in inputs.iter().map(|i| i.trim()).filter(|i| !i.is_empty()) {
        let path = Path::new(input);

        let matched = if path.is_file() {
            vec![path.to_path_buf()]
        } else if path.is_dir() {
            discover_csv_files(path)?
        } else {
            let matched = expand_glob(input)?;
            if matched.is_empty() {
                return Err(Error::file_not_found(input));
            }
            matched
        };

        for file in matched {
            if !files.contains(&file) {
                files.push(file);
            }
        }
    }

    if files.is_empty() {
        return Err(Error::invalid_arguments(
            "No CSV files found for the given inputs",
        ));
    }

    info!("Resolved {} input files", files.len());
    Ok(files)
}

/// Discover CSV files below a directory
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut csv_files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(|e| {
            Error::directory_traversal(format!("Failed to scan {}", dir.display()), e)
        })?;

        let path = entry.path();
        if path.is_file() && has_csv_extension(path) {
            csv_files.push(path.to_path_buf());
        }
    }

    csv_files.sort();
    debug!(
        "Discovered {} CSV files in {}",
        csv_files.len(),
        dir.display()
    );
    Ok(csv_files)
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| Error::input_pattern(pattern, e))?;

    let mut matched: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    matched.sort();
    Ok(matched)
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_FILE_EXTENSION))
}

/// Read a dataset file as text
pub async fn read_dataset(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))
}

/// Write a rendered report to a file, or stdout when no file is given
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            std::fs::write(path, content)
                .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;
            info!("Report written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Serialize a report as pretty JSON with a trailing newline
pub fn to_json<T: serde::Serialize>(report: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)
        .map_err(|e| Error::json("report", "Failed to encode report", e))?;
    json.push('\n');
    Ok(json)
}

/// Quote a CSV output field when it contains a separator, quote or newline
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Format an optional measurement for tabular output
pub fn format_value(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}
