//! Render plans.
//!
//! A [`RenderPlan`] is the value object that fully determines one output
//! reel: which source clips, which trimmed sub-ranges, which captions,
//! colors, hook phrase and music. It is created fresh per batch item and
//! consumed by the renderer.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::color::ColorScheme;

/// One body scene: a trimmed sub-range of a source clip with its caption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenePlan {
    /// Source clip path.
    pub source: PathBuf,
    /// Trim start within the source, seconds.
    pub start: f64,
    /// Scene duration, seconds (always the configured target duration).
    pub duration: f64,
    /// Caption rendered over this scene.
    pub caption: String,
    /// Probed source width, pixels.
    pub source_width: u32,
    /// Probed source height, pixels.
    pub source_height: u32,
}

/// Text-only intro scene on a black background.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookPlan {
    pub phrase: String,
    pub duration: f64,
}

/// Background music track and its probed duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicPlan {
    pub source: PathBuf,
    pub duration: f64,
}

/// Everything needed to render one reel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderPlan {
    /// Body scenes in playback order.
    pub scenes: Vec<ScenePlan>,
    /// Optional intro; a reel without a hook is still valid.
    pub hook: Option<HookPlan>,
    /// Optional soundtrack; a reel without music is silent, not an error.
    pub music: Option<MusicPlan>,
    /// Color scheme shared by all scenes of this reel.
    pub colors: ColorScheme,
    /// Final container path (`reel_<id>.mp4`).
    pub output: PathBuf,
}

impl RenderPlan {
    /// Duration of the concatenated body scenes, seconds.
    pub fn body_duration(&self) -> f64 {
        self.scenes.iter().map(|s| s.duration).sum()
    }

    /// Total output duration including the hook, seconds.
    pub fn total_duration(&self) -> f64 {
        self.body_duration() + self.hook.as_ref().map_or(0.0, |h| h.duration)
    }
}
