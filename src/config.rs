//! Configuration management and validation.
//!
//! Provides the pipeline configuration with layered loading: built-in
//! defaults, an optional JSON config file, then command-line overrides.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_MAX_SERIES_POINTS, DEFAULT_PREVIEW_ROWS,
    DEFAULT_SAMPLE_LINES,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for dataset analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum number of aggregated points kept per series (oldest dropped first)
    pub max_series_points: usize,

    /// Lines of CSV text included in a dataset sample
    pub sample_lines: usize,

    /// Data rows included in a dataset preview
    pub preview_rows: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_series_points: DEFAULT_MAX_SERIES_POINTS,
            sample_lines: DEFAULT_SAMPLE_LINES,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl PipelineConfig {
    /// Create configuration with a custom series cap
    pub fn with_max_series_points(mut self, max_series_points: usize) -> Self {
        self.max_series_points = max_series_points;
        self
    }

    /// Create configuration with a custom sample length
    pub fn with_sample_lines(mut self, sample_lines: usize) -> Self {
        self.sample_lines = sample_lines;
        self
    }

    /// Create configuration with a custom preview length
    pub fn with_preview_rows(mut self, preview_rows: usize) -> Self {
        self.preview_rows = preview_rows;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.max_series_points == 0 {
            return Err(Error::configuration(
                "max_series_points must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Default config file location (`<config_dir>/cmlre-ingest/config.json`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a JSON file; missing keys keep their defaults
    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::json(
                path.display().to_string(),
                "Invalid configuration file",
                e,
            )
        })?;
        config.validate()?;

        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Load configuration with the layered approach
    ///
    /// An explicit path must exist; the default path is used only if present.
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::file_not_found(path.display().to_string()));
            }
            return Self::from_file(path).await;
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path).await,
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_series_points, 100);
        assert_eq!(config.sample_lines, 100);
        assert_eq!(config.preview_rows, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = PipelineConfig::default()
            .with_max_series_points(30)
            .with_sample_lines(10)
            .with_preview_rows(2);

        assert_eq!(config.max_series_points, 30);
        assert_eq!(config.sample_lines, 10);
        assert_eq!(config.preview_rows, 2);
    }

    #[test]
    fn test_zero_series_cap_rejected() {
        let config = PipelineConfig::default().with_max_series_points(0);
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_series_points": 25}}"#).unwrap();

        let config = PipelineConfig::from_file(file.path()).await.unwrap();
        assert_eq!(config.max_series_points, 25);
        assert_eq!(config.sample_lines, 100);
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_error() {
        let result = PipelineConfig::load(Some(Path::new("/nonexistent/config.json"))).await;
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[tokio::test]
    async fn test_invalid_json_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = PipelineConfig::from_file(file.path()).await;
        assert!(matches!(result, Err(Error::Json { .. })));
    }
}
