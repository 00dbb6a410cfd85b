//! Publish scheduling for finished reels.

use std::path::Path;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use tracing::{info, warn};

use reel_models::UploadRequest;
use reel_schedule::{next_publish_times, read_checkpoint, write_checkpoint};

use crate::batch::ReelArtifact;
use crate::error::WorkerResult;

/// Assign a future publish slot to each artifact and advance the
/// checkpoint to the last assigned instant.
///
/// With no artifacts nothing is scheduled and the checkpoint is left
/// untouched.
pub fn schedule_uploads(
    artifacts: &[ReelArtifact],
    now: DateTime<Utc>,
    checkpoint_path: &Path,
    slots: &[NaiveTime],
    utc_offset: Duration,
) -> WorkerResult<Vec<UploadRequest>> {
    if artifacts.is_empty() {
        warn!("No reels to schedule");
        return Ok(Vec::new());
    }

    let last_upload = read_checkpoint(checkpoint_path)?;
    let times = next_publish_times(now, artifacts.len(), last_upload, slots, utc_offset);
    if times.is_empty() {
        warn!("No publish times available, skipping scheduling");
        return Ok(Vec::new());
    }

    let requests: Vec<UploadRequest> = artifacts
        .iter()
        .zip(times.iter())
        .map(|(artifact, publish_at)| UploadRequest {
            video_path: artifact.path.clone(),
            title: artifact.title.clone(),
            description: artifact.description.clone(),
            tags: artifact.tags.clone(),
            publish_at: *publish_at,
        })
        .collect();

    if let Some(last) = times.last() {
        write_checkpoint(checkpoint_path, *last)?;
    }

    info!(
        count = requests.len(),
        first = %times[0],
        last = %times[times.len() - 1],
        "Publish schedule assigned"
    );
    Ok(requests)
}
