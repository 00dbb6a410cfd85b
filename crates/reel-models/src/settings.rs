//! Render settings for the fixed reel template.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default vertical resolution (9:16).
pub const DEFAULT_TARGET_WIDTH: u32 = 1080;
pub const DEFAULT_TARGET_HEIGHT: u32 = 1920;
/// Default per-scene and hook duration, seconds.
pub const DEFAULT_SCENE_DURATION: f64 = 2.0;
/// Default fade-in/fade-out length, seconds.
pub const DEFAULT_FADE_DURATION: f64 = 0.3;

/// Policy for a batch item that found fewer usable clips than captions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneShortfall {
    /// Drop trailing captions so each remaining one gets a clip.
    TruncateCaptions,
    /// Fail the item instead of producing a shorter reel.
    Fail,
}

/// Knobs for the single visual template every reel follows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Output width, pixels.
    pub target_width: u32,
    /// Output height, pixels.
    pub target_height: u32,
    /// Duration of each body scene, seconds.
    pub scene_duration: f64,
    /// Duration of the hook intro, seconds.
    pub hook_duration: f64,
    /// Linear fade-in/out length at each scene boundary, seconds.
    pub fade_duration: f64,
    /// Caption font size, points.
    pub caption_font_size: u32,
    /// Hook font size, points.
    pub hook_font_size: u32,
    /// Maximum caption text width, pixels; longer text wraps.
    pub caption_box_width: u32,
    /// Maximum hook text width, pixels; longer text wraps.
    pub hook_box_width: u32,
    /// Opacity of the dark legibility overlay, 0.0..=1.0.
    pub overlay_opacity: f64,
    /// Logo height as a fraction of the output height.
    pub logo_height_frac: f64,
    /// Logo offset from the bottom edge, pixels.
    pub logo_bottom_margin: u32,
    /// Output frame rate.
    pub fps: u32,
    /// Unusable lead-in region of each source clip, seconds.
    pub start_margin: f64,
    /// Unusable lead-out region of each source clip, seconds.
    pub end_margin: f64,
    /// Music volume scale factor.
    pub music_volume: f64,
    /// Caption/hook font file; falls back to the system default if absent.
    pub font_file: Option<PathBuf>,
    /// What to do when fewer clips than captions are usable.
    pub shortfall: SceneShortfall,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
            target_height: DEFAULT_TARGET_HEIGHT,
            scene_duration: DEFAULT_SCENE_DURATION,
            hook_duration: DEFAULT_SCENE_DURATION,
            fade_duration: DEFAULT_FADE_DURATION,
            caption_font_size: 40,
            hook_font_size: 40,
            caption_box_width: 900,
            hook_box_width: 800,
            overlay_opacity: 0.6,
            logo_height_frac: 0.1,
            logo_bottom_margin: 250,
            fps: 30,
            start_margin: 1.0,
            end_margin: 1.0,
            music_volume: 1.0,
            font_file: None,
            shortfall: SceneShortfall::TruncateCaptions,
        }
    }
}

impl RenderSettings {
    /// Returns settings with a different output resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.target_width = width;
        self.target_height = height;
        self
    }

    /// Returns settings with a different per-scene duration.
    pub fn with_scene_duration(mut self, seconds: f64) -> Self {
        self.scene_duration = seconds;
        self
    }

    /// Returns settings with a different fade length.
    pub fn with_fade_duration(mut self, seconds: f64) -> Self {
        self.fade_duration = seconds;
        self
    }

    /// Returns settings with an explicit font file.
    pub fn with_font_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_file = Some(path.into());
        self
    }

    /// Returns settings with a different shortfall policy.
    pub fn with_shortfall(mut self, policy: SceneShortfall) -> Self {
        self.shortfall = policy;
        self
    }

    /// Pixel height of the branding logo at this resolution.
    pub fn logo_height(&self) -> u32 {
        (self.target_height as f64 * self.logo_height_frac) as u32
    }
}
