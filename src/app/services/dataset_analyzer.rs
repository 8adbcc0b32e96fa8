//! Dataset analysis pipeline
//!
//! Runs uploaded CSV text through the full pipeline: table parsing, column
//! inference, record extraction and date aggregation. The analyzer holds only
//! configuration; every call is a pure transform of its input.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::app::models::{AggregatedParameterPoint, LocationPoint, ParameterRecord};
use crate::app::services::aggregator::aggregate_by_date;
use crate::app::services::csv_table::column_inference::ColumnEntry;
use crate::app::services::csv_table::parser::sample_lines;
use crate::app::services::csv_table::{ColumnIndex, ExtractionStats, RawTable, extract_records};
use crate::config::PipelineConfig;

/// Chart-ready output for a single dataset
#[derive(Debug, Clone, Serialize)]
pub struct DatasetAnalysis {
    /// Column headers as uploaded
    pub headers: Vec<String>,

    /// Number of data rows
    pub row_count: usize,

    /// Column found for each semantic field
    pub columns: Vec<ColumnEntry>,

    /// Sampling locations in row order
    pub locations: Vec<LocationPoint>,

    /// Per-date averages, oldest first, capped
    pub series: Vec<AggregatedParameterPoint>,

    /// Row extraction statistics
    pub stats: ExtractionStats,
}

impl DatasetAnalysis {
    /// Check if the dataset produced no chartable data
    pub fn has_no_data(&self) -> bool {
        self.locations.is_empty() && self.series.is_empty()
    }
}

/// Chart-ready output pooled over several datasets
#[derive(Debug, Clone, Serialize)]
pub struct CombinedAnalysis {
    /// Number of datasets pooled
    pub datasets: usize,

    /// Sampling locations, dataset by dataset in row order
    pub locations: Vec<LocationPoint>,

    /// Per-date averages over all datasets, oldest first, capped
    pub series: Vec<AggregatedParameterPoint>,

    /// Row extraction statistics summed over datasets
    pub stats: ExtractionStats,
}

/// Runs the ingestion pipeline with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct DatasetAnalyzer {
    config: PipelineConfig,
}

impl DatasetAnalyzer {
    /// Create a new analyzer
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The analyzer's configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Analyze a single dataset's CSV text
    pub fn analyze(&self, csv_text: &str) -> DatasetAnalysis {
        let table = RawTable::parse(csv_text);
        let index = ColumnIndex::infer(&table.headers);
        let extraction = extract_records(&table, &index);
        let series = aggregate_by_date(&extraction.parameters, self.config.max_series_points);

        debug!(
            "Extracted {} locations and {} readings from {} rows",
            extraction.stats.locations_extracted,
            extraction.stats.parameters_extracted,
            extraction.stats.total_rows
        );

        let analysis = DatasetAnalysis {
            row_count: table.row_count(),
            columns: index.entries(),
            headers: table.headers,
            locations: extraction.locations,
            series,
            stats: extraction.stats,
        };

        if analysis.has_no_data() {
            warn!("Dataset produced no location or parameter data");
        }

        analysis
    }

    /// Pool several datasets into one location list and one series
    ///
    /// Readings for the same date in different datasets are averaged together.
    pub fn analyze_many<'a, I>(&self, csv_texts: I) -> CombinedAnalysis
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut datasets = 0;
        let mut locations: Vec<LocationPoint> = Vec::new();
        let mut parameters: Vec<ParameterRecord> = Vec::new();
        let mut stats = ExtractionStats::new();

        for text in csv_texts {
            datasets += 1;
            let table = RawTable::parse(text);
            let index = ColumnIndex::infer(&table.headers);
            let extraction = extract_records(&table, &index);

            stats.merge(&extraction.stats);
            locations.extend(extraction.locations);
            parameters.extend(extraction.parameters);
        }

        let series = aggregate_by_date(&parameters, self.config.max_series_points);
        info!(
            "Pooled {} datasets: {} locations, {} series points",
            datasets,
            locations.len(),
            series.len()
        );

        CombinedAnalysis {
            datasets,
            locations,
            series,
            stats,
        }
    }

    /// Leading lines of the CSV text for the external summary service
    pub fn sample(&self, csv_text: &str) -> String {
        sample_lines(csv_text, self.config.sample_lines)
    }

    /// Headers plus the first few data rows
    pub fn preview(&self, csv_text: &str) -> RawTable {
        RawTable::parse(csv_text).preview(self.config.preview_rows)
    }
}
