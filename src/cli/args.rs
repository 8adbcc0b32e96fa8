//! Command-line argument definitions for the CMLRE ingestion tool
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::models::SubmissionStatus;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the oceanographic dataset ingestion tool
///
/// Turns uploaded CSV datasets into chart-ready series and summarises
/// submission exports for the review dashboard.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cmlre-ingest",
    version,
    about = "Derive chart series and submission metrics from oceanographic CSV uploads",
    long_about = "Parses user-uploaded oceanographic CSV datasets, infers latitude, longitude, \
                  date and measurement columns from free-text headers, and produces location \
                  lists and per-day averaged parameter series. Also summarises submission \
                  exports into monthly trends, status counts and record estimates."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Analyze CSV datasets into locations and a per-day parameter series
    Analyze(AnalyzeArgs),
    /// Show which column each semantic field maps to
    Columns(ColumnsArgs),
    /// Show the summary-service sample or a row preview of a dataset
    Sample(SampleArgs),
    /// Monthly submission trend, status counts and record totals
    Trends(TrendsArgs),
    /// Search submissions by name, description, submitter or CSV text
    Search(SearchArgs),
}

/// Logging flags shared by every command
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct LoggingArgs {
    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the analyze command
#[derive(Debug, Clone, Parser)]
pub struct AnalyzeArgs {
    /// CSV inputs: files, directories (scanned for *.csv) or glob patterns
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Pool all inputs into a single location list and series
    #[arg(long = "combined", help = "Aggregate all inputs into one series")]
    pub combined: bool,

    /// Override the series cap from the config file
    #[arg(
        long = "max-points",
        value_name = "COUNT",
        help = "Maximum number of points kept per series"
    )]
    pub max_points: Option<usize>,

    /// Path to configuration file
    ///
    /// JSON configuration file. If not specified, looks for
    /// <config dir>/cmlre-ingest/config.json
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long = "output-file", value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Output format for results
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Arguments for the columns command
#[derive(Debug, Clone, Parser)]
pub struct ColumnsArgs {
    /// CSV file whose header row is inspected
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output format for results
    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Arguments for the sample command
#[derive(Debug, Clone, Parser)]
pub struct SampleArgs {
    /// CSV file to sample
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Show a parsed header-plus-rows preview instead of raw leading lines
    #[arg(long = "preview", help = "Show a parsed row preview")]
    pub preview: bool,

    /// Path to configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Output format for results
    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Arguments for the trends command
#[derive(Debug, Clone, Parser)]
pub struct TrendsArgs {
    /// Submission export files (JSON); pass active and archived exports together
    #[arg(
        short = 's',
        long = "submissions",
        value_name = "FILE",
        required = true,
        num_args = 1..
    )]
    pub submissions: Vec<PathBuf>,

    /// Reference instant for the 12-month window (RFC 3339); defaults to now
    #[arg(long = "now", value_name = "TIMESTAMP")]
    pub now: Option<String>,

    /// Restrict to one user's submissions
    #[arg(short = 'u', long = "user", value_name = "USER_ID")]
    pub user: Option<String>,

    /// Output format for results
    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Arguments for the search command
#[derive(Debug, Clone, Parser)]
pub struct SearchArgs {
    /// Submission export files (JSON)
    #[arg(
        short = 's',
        long = "submissions",
        value_name = "FILE",
        required = true,
        num_args = 1..
    )]
    pub submissions: Vec<PathBuf>,

    /// Case-insensitive search term
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Only list submissions in this status
    #[arg(long = "status", value_name = "STATUS")]
    pub status: Option<SubmissionStatus>,

    /// Merge exports as the approved listing: approved only, de-duplicated, newest first
    #[arg(long = "approved", conflicts_with = "status")]
    pub approved: bool,

    /// Output format for results
    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

impl Commands {
    /// Logging flags of the selected command
    pub fn logging(&self) -> &LoggingArgs {
        match self {
            Commands::Analyze(args) => &args.logging,
            Commands::Columns(args) => &args.logging,
            Commands::Sample(args) => &args.logging,
            Commands::Trends(args) => &args.logging,
            Commands::Search(args) => &args.logging,
        }
    }
}

impl LoggingArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl AnalyzeArgs {
    /// Validate the analyze command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.inputs.iter().all(|input| input.trim().is_empty()) {
            return Err(Error::invalid_arguments("At least one input is required"));
        }

        if self.max_points == Some(0) {
            return Err(Error::invalid_arguments(
                "--max-points must be greater than 0",
            ));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }
}

impl TrendsArgs {
    /// Resolve the window reference instant, falling back to the current time
    pub fn reference_time(&self) -> Result<DateTime<Utc>> {
        match &self.now {
            Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    Error::datetime_parsing(
                        format!("Invalid --now '{}' (expected RFC 3339)", raw),
                        e,
                    )
                }),
            None => Ok(Utc::now()),
        }
    }
}
