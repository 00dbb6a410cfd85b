//! Checkpoint persistence.
//!
//! The checkpoint is a single RFC 3339 timestamp: the most recently
//! scheduled publish instant. It is read at scheduler start and
//! overwritten after each successful batch; absence means no prior
//! upload.

use std::path::Path;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

pub type ScheduleResult<T> = Result<T, ScheduleError>;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid checkpoint timestamp {value:?}: {source}")]
    InvalidCheckpoint {
        value: String,
        source: chrono::ParseError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read the last scheduled publish instant, if any.
///
/// A missing file or a blank file means "no prior upload"; a present but
/// unparsable timestamp is an error rather than a silent restart.
pub fn read_checkpoint(path: &Path) -> ScheduleResult<Option<DateTime<Utc>>> {
    if !path.exists() {
        debug!(checkpoint = %path.display(), "No checkpoint file, starting fresh");
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)?;
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parsed = DateTime::parse_from_rfc3339(trimmed).map_err(|source| {
        ScheduleError::InvalidCheckpoint {
            value: trimmed.to_string(),
            source,
        }
    })?;

    Ok(Some(parsed.with_timezone(&Utc)))
}

/// Overwrite the checkpoint with a new instant.
pub fn write_checkpoint(path: &Path, instant: DateTime<Utc>) -> ScheduleResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, instant.to_rfc3339())?;
    debug!(checkpoint = %path.display(), instant = %instant, "Checkpoint written");
    Ok(())
}
