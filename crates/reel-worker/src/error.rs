//! Worker error types.

use std::path::PathBuf;
use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("No quote records to process")]
    NoQuotes,

    #[error("Quotes file not found: {0}")]
    QuotesFileMissing(PathBuf),

    #[error("Source video directory missing or empty: {0}")]
    SourceVideosUnavailable(PathBuf),

    #[error("Planning failed: {0}")]
    PlanFailed(String),

    #[error("Media error: {0}")]
    Media(#[from] reel_media::MediaError),

    #[error("Schedule error: {0}")]
    Schedule(#[from] reel_schedule::ScheduleError),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn plan_failed(msg: impl Into<String>) -> Self {
        Self::PlanFailed(msg.into())
    }
}
