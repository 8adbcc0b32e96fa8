//! CMLRE Ingest Library
//!
//! A Rust library for turning user-uploaded oceanographic CSV datasets into
//! chart-ready series and submission trend metrics.
//!
//! This library provides tools for:
//! - Splitting raw dataset text into a header list and rows
//! - Inferring latitude, longitude, date and measurement columns from free-text headers
//! - Extracting location points and dated parameter readings, skipping malformed rows
//! - Averaging same-day readings into a capped, chronologically sorted series
//! - Bucketing submissions into a trailing 12-month trend
//! - Submission summaries: status counts, record estimates, search and merging

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregator;
        pub mod csv_table;
        pub mod dataset_analyzer;
        pub mod submission_metrics;
        pub mod submission_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    AggregatedParameterPoint, LocationPoint, MonthlySubmissionCount, ParameterRecord,
    SemanticField, Submission, SubmissionStatus,
};
pub use app::services::dataset_analyzer::{DatasetAnalysis, DatasetAnalyzer};
pub use config::PipelineConfig;

/// Result type alias for the ingestion pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the outer surfaces of the pipeline (files, config, CLI)
///
/// The pipeline itself never fails: malformed input degrades to empty output.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Submission JSON could not be decoded
    #[error("JSON error in '{file}': {message}")]
    Json {
        file: String,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Invalid glob pattern
    #[error("Invalid input pattern '{pattern}'")]
    InputPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Invalid command line arguments
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON decoding error for a named source
    pub fn json(
        file: impl Into<String>,
        message: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        Self::Json {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }

    /// Create an input pattern error
    pub fn input_pattern(pattern: impl Into<String>, source: glob::PatternError) -> Self {
        Self::InputPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            file: "unknown".to_string(),
            message: "JSON decoding failed".to_string(),
            source: error,
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

impl From<glob::PatternError> for Error {
    fn from(error: glob::PatternError) -> Self {
        Self::InputPattern {
            pattern: "unknown".to_string(),
            source: error,
        }
    }
}
