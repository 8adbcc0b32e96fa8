//! Integration tests for the ingestion pipeline
//!
//! These tests write realistic uploads and submission exports to a temporary
//! directory and drive them through the public library and command APIs.

use chrono::{DateTime, Utc};
use cmlre_ingest::app::services::submission_metrics::{
    merge_approved, monthly_submission_counts, search_submissions, status_counts,
};
use cmlre_ingest::app::services::submission_store::{load_all, load_sources};
use cmlre_ingest::cli::args::{AnalyzeArgs, LoggingArgs, OutputFormat};
use cmlre_ingest::cli::commands::analyze::run_analyze;
use cmlre_ingest::cli::commands::trends::TrendsReport;
use cmlre_ingest::{DatasetAnalyzer, Error, PipelineConfig, SubmissionStatus};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CTD_CAST: &str = "Station,Latitude,Longitude,Date,Temperature (C),Salinity (PSU)\n\
KOC-01,9.9312,76.2673,2025-08-02 06:10,28.4,34.9\n\
KOC-02,9.9500,76.2000,2025-08-02 18:40,28.0,35.1\n\
KOC-03,not recorded,76.1800,2025-08-03,27.6,\n\
KOC-04,9.9700,76.1500,,27.9,35.0\n";

const BUOY_LOG: &str = "date,wind speed (m/s),air temp\r\n\
08/03/2025,6.5,29.1\r\n\
08/04/2025,7.1,28.7\r\n";

const ACTIVE_EXPORT: &str = r#"{
    "-Oa1": {
        "name": "Kochi CTD casts",
        "description": "Coastal temperature and salinity",
        "csvData": "date,temp\n2025-08-02,28.4\n2025-08-03,27.6\n",
        "submittedBy": "R. Nair",
        "date": "2025-08-05T09:00:00Z",
        "userId": "user-1",
        "status": "approved"
    },
    "-Oa2": {
        "name": "Buoy wind log",
        "csvData": "date,wind\n2025-09-01,6.5",
        "submittedBy": "S. Iyer",
        "date": "2025-09-12T14:30:00Z",
        "userId": "user-2",
        "status": "pending"
    }
}"#;

const ARCHIVED_EXPORT: &str = r#"[
    {
        "id": "-Oa0",
        "name": "Andaman salinity transect",
        "csvData": "date,salinity\n2024-11-20,33.8",
        "submittedBy": "T. Das",
        "date": "2024-11-21T08:00:00Z",
        "userId": "user-1",
        "status": "approved"
    },
    {
        "id": "-Nz9",
        "name": "Old pilot upload",
        "submittedBy": "T. Das",
        "date": "2023-03-01T08:00:00Z",
        "userId": "user-1",
        "status": "rejected"
    }
]"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn reference_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-09-30T23:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn quiet() -> LoggingArgs {
    LoggingArgs {
        verbose: 0,
        quiet: true,
    }
}

#[test]
fn test_single_dataset_pipeline() {
    let analysis = DatasetAnalyzer::default().analyze(CTD_CAST);

    assert_eq!(analysis.row_count, 4);
    // KOC-03 has an unreadable latitude
    assert_eq!(analysis.locations.len(), 3);
    assert_eq!(analysis.stats.rows_without_location, 1);
    // KOC-04 has no date
    assert_eq!(analysis.stats.rows_with_bad_date, 1);

    let dates: Vec<&str> = analysis.series.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(dates, vec!["Aug 2", "Aug 3"]);

    let aug2 = &analysis.series[0];
    assert!((aug2.temperature.unwrap() - 28.2).abs() < 1e-9);
    assert!((aug2.salinity.unwrap() - 35.0).abs() < 1e-9);
    assert_eq!(aug2.wind_speed, None);

    let aug3 = &analysis.series[1];
    assert_eq!(aug3.temperature, Some(27.6));
    assert_eq!(aug3.salinity, None);
}

#[test]
fn test_pooled_datasets() {
    let analyzer = DatasetAnalyzer::new(PipelineConfig::default().with_max_series_points(2));
    let combined = analyzer.analyze_many([CTD_CAST, BUOY_LOG]);

    assert_eq!(combined.datasets, 2);
    assert_eq!(combined.stats.total_rows, 6);

    // Aug 2 falls off the two-point cap
    let dates: Vec<&str> = combined.series.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(dates, vec!["Aug 3", "Aug 4"]);

    let aug3 = &combined.series[0];
    assert!((aug3.temperature.unwrap() - 28.35).abs() < 1e-9);
    assert_eq!(aug3.wind_speed, Some(6.5));
}

#[tokio::test]
async fn test_analyze_command_writes_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let uploads = temp_dir.path().join("uploads");
    fs::create_dir_all(&uploads).unwrap();
    write(&uploads, "ctd.csv", CTD_CAST);
    write(&uploads, "buoy.csv", BUOY_LOG);
    write(&uploads, "readme.txt", "not a dataset");
    let output = temp_dir.path().join("report.json");

    let args = AnalyzeArgs {
        inputs: vec![uploads.display().to_string()],
        combined: false,
        max_points: None,
        config_file: None,
        output_file: Some(output.clone()),
        output_format: OutputFormat::Json,
        logging: quiet(),
    };

    let summary = run_analyze(args).await.unwrap();
    assert_eq!(summary.files_processed, 2);
    assert_eq!(summary.rows_processed, 6);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let reports = report.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports[0]["file"].as_str().unwrap().ends_with("buoy.csv"));
    assert_eq!(reports[0]["series"].as_array().unwrap().len(), 2);
    assert_eq!(reports[1]["locations"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_analyze_command_rejects_missing_input() {
    let args = AnalyzeArgs {
        inputs: vec!["/nonexistent/uploads/*.csv".to_string()],
        combined: true,
        max_points: None,
        config_file: None,
        output_file: None,
        output_format: OutputFormat::Csv,
        logging: quiet(),
    };

    let result = run_analyze(args).await;
    assert!(matches!(result, Err(Error::FileNotFound { .. })));
}

#[tokio::test]
async fn test_submission_exports_to_dashboard_metrics() {
    let temp_dir = TempDir::new().unwrap();
    let active = write(temp_dir.path(), "active.json", ACTIVE_EXPORT);
    let archived = write(temp_dir.path(), "archived.json", ARCHIVED_EXPORT);
    let paths = vec![active, archived];

    let all = load_all(&paths).await.unwrap();
    assert_eq!(all.len(), 4);

    let trend = monthly_submission_counts(&all, reference_time());
    assert_eq!(trend.len(), 12);
    assert_eq!(trend[0].month, "Oct 24");
    let counted: u32 = trend.iter().map(|bin| bin.submissions).sum();
    assert_eq!(counted, 3);

    let counts = status_counts(&all);
    assert_eq!(counts.get(SubmissionStatus::Approved), 2);
    assert_eq!(counts.total, 4);

    let report = TrendsReport::build(&all, reference_time());
    // 3 (trailing newline) + 1 + 1 + 0
    assert_eq!(report.total_records, 5);
    assert_eq!(report.approved_records, 4);

    let mut sources = load_sources(&paths).await.unwrap().into_iter();
    let listing = merge_approved(sources.next().unwrap(), sources.next().unwrap());
    let names: Vec<&str> = listing.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Kochi CTD casts", "Andaman salinity transect"]);

    let hits = search_submissions(&all, "  SALINITY ");
    assert_eq!(hits.len(), 2);
}
