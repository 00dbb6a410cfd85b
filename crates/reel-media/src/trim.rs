//! Trim-window selection.
//!
//! A scene is a fixed-duration sub-range of its source clip. The start is
//! chosen uniformly inside the safe region that excludes the configured
//! lead-in/lead-out margins; clips too short to honor both margins fall
//! back to a fixed offset near the head instead.

use rand::Rng;
use reel_models::RenderSettings;

/// Start offset used when a clip cannot honor both safe margins.
///
/// Deliberately distinct from `start_margin`: short clips trade the
/// title-card guard for keeping the full target duration.
pub const SHORT_CLIP_FALLBACK_START: f64 = 0.25;

/// A `[start, start + duration)` sub-range of a source clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimWindow {
    pub start: f64,
    pub duration: f64,
}

impl TrimWindow {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Choose a trim window for a clip of `clip_duration` seconds.
///
/// The returned window always has exactly the configured scene duration,
/// whichever branch is taken. Clip selection filters out clips shorter
/// than `SHORT_CLIP_FALLBACK_START + scene_duration`, so the window fits
/// inside the clip on both branches.
pub fn choose_trim_window<R: Rng + ?Sized>(
    clip_duration: f64,
    settings: &RenderSettings,
    rng: &mut R,
) -> TrimWindow {
    let target = settings.scene_duration;
    let safe = clip_duration - settings.start_margin - settings.end_margin;

    let start = if safe <= target {
        SHORT_CLIP_FALLBACK_START
    } else {
        let max_start = clip_duration - target - settings.end_margin;
        rng.random_range(settings.start_margin..max_start)
    };

    TrimWindow {
        start,
        duration: target,
    }
}
