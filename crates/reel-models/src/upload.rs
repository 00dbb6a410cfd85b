//! Upload requests for the publishing boundary.
//!
//! The upload client itself lives outside this workspace; the pipeline's
//! only obligation is to assemble these tuples and log acknowledgements.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One finished reel paired with its metadata and publish slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    /// Path to the encoded container file.
    pub video_path: PathBuf,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Absolute release moment.
    pub publish_at: DateTime<Utc>,
}

/// Tags appended to every upload.
pub fn default_video_tags() -> Vec<String> {
    [
        "shorts",
        "youtube shorts",
        "motivation",
        "luxury lifestyle",
        "inspiration",
    ]
    .iter()
    .map(|t| t.to_string())
    .collect()
}

impl UploadRequest {
    /// Merge record-specific tags with the default tag set, deduplicated.
    pub fn merged_tags(record_tags: &[String]) -> Vec<String> {
        let mut tags = record_tags.to_vec();
        for tag in default_video_tags() {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }
}
