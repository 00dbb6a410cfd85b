//! Random asset selection.
//!
//! Clips are sampled uniformly without replacement and probe-validated;
//! files that fail validation are skipped, not retried. Music selection is
//! a single uniform choice, and a missing or empty music directory means
//! "no soundtrack" rather than an error.

use std::path::{Path, PathBuf};

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{info, warn};

use reel_models::MusicPlan;

use crate::error::{MediaError, MediaResult};
use crate::probe::{MediaProber, VideoInfo};

/// Accepted source clip extensions (lowercase).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "flv"];

/// Accepted music track extensions (lowercase).
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "aac", "ogg"];

/// A probe-validated source clip.
#[derive(Debug, Clone)]
pub struct SourceClip {
    pub path: PathBuf,
    pub info: VideoInfo,
}

/// List files in `dir` whose extension matches `extensions`.
fn list_media_files(dir: &Path, extensions: &[&str]) -> MediaResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if matches {
            files.push(path);
        }
    }
    // Directory order is filesystem-dependent; sort so sampling with a
    // seeded rng is reproducible.
    files.sort();
    Ok(files)
}

/// Select up to `count` usable clips from `dir`, uniformly without
/// replacement.
///
/// The requested count is silently reduced when fewer candidates exist
/// (logged, not an error). Errors when the directory is missing or when
/// no sampled file survives probe validation. Clips shorter than
/// `min_duration` are skipped so every sampled clip can hold a full trim
/// window, fallback branch included.
pub async fn select_clips<P, R>(
    dir: &Path,
    count: usize,
    min_duration: f64,
    prober: &P,
    rng: &mut R,
) -> MediaResult<Vec<SourceClip>>
where
    P: MediaProber + ?Sized,
    R: Rng + Send,
{
    if !dir.is_dir() {
        return Err(MediaError::SourceDirMissing(dir.to_path_buf()));
    }

    let candidates = list_media_files(dir, VIDEO_EXTENSIONS)?;
    if candidates.is_empty() {
        return Err(MediaError::NoUsableClips(dir.to_path_buf()));
    }

    let count = if candidates.len() < count {
        warn!(
            available = candidates.len(),
            requested = count,
            dir = %dir.display(),
            "Fewer source clips than requested, reducing count"
        );
        candidates.len()
    } else {
        count
    };

    let sampled: Vec<PathBuf> = candidates
        .choose_multiple(rng, count)
        .cloned()
        .collect();

    let mut clips = Vec::with_capacity(sampled.len());
    for path in sampled {
        match prober.video_info(&path).await {
            Ok(info) if info.is_usable() && info.duration >= min_duration => {
                info!(
                    clip = %path.display(),
                    duration = format!("{:.1}", info.duration),
                    "Selected source clip"
                );
                clips.push(SourceClip { path, info });
            }
            Ok(info) if info.is_usable() => {
                warn!(
                    clip = %path.display(),
                    duration = format!("{:.1}", info.duration),
                    "Skipping clip shorter than the minimum scene window"
                );
            }
            Ok(_) => {
                warn!(clip = %path.display(), "Skipping clip with invalid metadata");
            }
            Err(e) => {
                warn!(clip = %path.display(), error = %e, "Skipping unreadable clip");
            }
        }
    }

    if clips.is_empty() {
        return Err(MediaError::NoUsableClips(dir.to_path_buf()));
    }

    Ok(clips)
}

/// Pick one music track from `dir`, or `None` when the directory is
/// absent, empty, or the chosen file cannot be probed.
pub async fn select_music<P, R>(
    dir: &Path,
    prober: &P,
    rng: &mut R,
) -> MediaResult<Option<MusicPlan>>
where
    P: MediaProber + ?Sized,
    R: Rng + Send,
{
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "Music folder not found, continuing without music");
        return Ok(None);
    }

    let candidates = list_media_files(dir, AUDIO_EXTENSIONS)?;
    let Some(chosen) = candidates.choose(rng).cloned() else {
        warn!(dir = %dir.display(), "No audio files found, continuing without music");
        return Ok(None);
    };

    match prober.audio_info(&chosen).await {
        Ok(info) => {
            info!(
                track = %chosen.display(),
                duration = format!("{:.1}", info.duration),
                "Selected music track"
            );
            Ok(Some(MusicPlan {
                source: chosen,
                duration: info.duration,
            }))
        }
        Err(e) => {
            warn!(track = %chosen.display(), error = %e, "Failed to load music, continuing without");
            Ok(None)
        }
    }
}
