//! Quote-file loading.

use std::path::Path;

use tracing::{info, warn};

use reel_models::QuoteRecord;

use crate::error::{WorkerError, WorkerResult};

/// Load quote records from a JSON file.
///
/// Records failing validation (wrong caption count, blank captions) are
/// skipped with a warning; the batch decides whether an empty result is
/// fatal.
pub fn load_quotes(path: &Path) -> WorkerResult<Vec<QuoteRecord>> {
    if !path.exists() {
        return Err(WorkerError::QuotesFileMissing(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;
    let records: Vec<QuoteRecord> = serde_json::from_str(&contents)?;

    let mut valid = Vec::with_capacity(records.len());
    for record in records {
        match record.validate() {
            Ok(()) => valid.push(record),
            Err(e) => warn!(record = record.id, error = %e, "Skipping invalid quote record"),
        }
    }

    info!(records = valid.len(), file = %path.display(), "Loaded quote records");
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_and_skip_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("content.json");
        std::fs::write(
            &path,
            r#"[
                {"id": 1, "quotes": ["a","b","c","d"], "video_title": "one"},
                {"id": 2, "quotes": ["a","b"], "video_title": "two"},
                {"id": 3, "quotes": ["a","b","c","d"], "video_title": "three"}
            ]"#,
        )
        .unwrap();

        let records = load_quotes(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[1].id, 3);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = load_quotes(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, WorkerError::QuotesFileMissing(_)));
    }

    #[test]
    fn test_malformed_json_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            load_quotes(&path),
            Err(WorkerError::JsonParse(_))
        ));
    }
}
