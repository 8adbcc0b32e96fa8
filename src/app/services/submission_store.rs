//! Loading submission exports from disk
//!
//! Submissions come from document-store JSON exports, either as an array of
//! records or as an object keyed by record id (the realtime-database layout).
//! Several exports can be read concurrently; the joined collection is then
//! handed to the pure metric functions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use serde::Deserialize;
use tracing::{debug, info};

use crate::app::models::Submission;
use crate::{Error, Result};

/// Accepted export layouts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SubmissionExport {
    List(Vec<Submission>),
    Keyed(BTreeMap<String, Submission>),
}

impl SubmissionExport {
    fn into_submissions(self) -> Vec<Submission> {
        match self {
            SubmissionExport::List(submissions) => submissions,
            SubmissionExport::Keyed(entries) => entries
                .into_iter()
                .map(|(key, mut submission)| {
                    submission.id.get_or_insert(key);
                    submission
                })
                .collect(),
        }
    }
}

/// Decode submissions from export JSON text
///
/// In the keyed layout a record without its own id takes its key as id.
pub fn parse_submissions(json: &str, source: &str) -> Result<Vec<Submission>> {
    let export: SubmissionExport = serde_json::from_str(json)
        .map_err(|e| Error::json(source, "Unrecognised submission export", e))?;
    Ok(export.into_submissions())
}

/// Load submissions from one export file
pub async fn load_submissions(path: &Path) -> Result<Vec<Submission>> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;

    let submissions = parse_submissions(&content, &path.display().to_string())?;
    debug!(
        "Loaded {} submissions from {}",
        submissions.len(),
        path.display()
    );
    Ok(submissions)
}

/// Load several export files concurrently, keeping one list per file
pub async fn load_sources(paths: &[PathBuf]) -> Result<Vec<Vec<Submission>>> {
    let sources = try_join_all(paths.iter().map(|path| load_submissions(path))).await?;

    info!(
        "Loaded {} submissions from {} sources",
        sources.iter().map(Vec::len).sum::<usize>(),
        sources.len()
    );
    Ok(sources)
}

/// Load several export files concurrently into one list
pub async fn load_all(paths: &[PathBuf]) -> Result<Vec<Submission>> {
    Ok(load_sources(paths).await?.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::SubmissionStatus;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LIST_EXPORT: &str = r#"[
        {
            "id": "sub-1",
            "name": "Kochi CTD",
            "description": "CTD casts off Kochi",
            "csvData": "date,temp\n2025-08-01,27.5",
            "submittedBy": "A. Researcher",
            "date": "2025-08-03T10:15:00Z",
            "userId": "user-1",
            "status": "approved"
        }
    ]"#;

    const KEYED_EXPORT: &str = r#"{
        "-Nx1": {
            "name": "Lakshadweep salinity",
            "csvData": "date,salinity\n2025-08-01,34.6",
            "submittedBy": "B. Student",
            "date": "2025-09-01T08:00:00Z",
            "userId": "user-2",
            "status": "pending"
        },
        "-Nx2": {
            "id": "explicit",
            "name": "Wind log",
            "submittedBy": "B. Student",
            "date": "2025-09-02T08:00:00Z",
            "status": "new"
        }
    }"#;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_parse_list_export() {
        let submissions = parse_submissions(LIST_EXPORT, "list").unwrap();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].id.as_deref(), Some("sub-1"));
        assert_eq!(submissions[0].status, SubmissionStatus::Approved);
        assert_eq!(submissions[0].submitted_by, "A. Researcher");
        assert!(submissions[0].csv_data.starts_with("date,temp"));
    }

    #[test]
    fn test_parse_keyed_export_fills_ids() {
        let submissions = parse_submissions(KEYED_EXPORT, "keyed").unwrap();
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].id.as_deref(), Some("-Nx1"));
        assert_eq!(submissions[1].id.as_deref(), Some("explicit"));
        assert_eq!(submissions[1].csv_data, "");
        assert_eq!(submissions[1].user_id, "");
    }

    #[test]
    fn test_parse_rejects_unknown_layout() {
        let result = parse_submissions("42", "number");
        assert!(matches!(result, Err(Error::Json { .. })));
    }

    #[tokio::test]
    async fn test_load_sources_concurrently() {
        let list = write_temp(LIST_EXPORT);
        let keyed = write_temp(KEYED_EXPORT);
        let paths = vec![list.path().to_path_buf(), keyed.path().to_path_buf()];

        let sources = load_sources(&paths).await.unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].len(), 1);
        assert_eq!(sources[1].len(), 2);

        let all = load_all(&paths).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = load_submissions(Path::new("/nonexistent/submissions.json")).await;
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }
}
