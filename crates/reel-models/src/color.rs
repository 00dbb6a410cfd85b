//! Caption color schemes.

use serde::{Deserialize, Serialize};

/// Stroke/text color pair, chosen once per reel and held constant across
/// all of its scenes. Values are ffmpeg color names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    /// Outline color (also used as the hook text fill).
    pub stroke: String,
    /// Caption fill color.
    pub text: String,
}

impl ColorScheme {
    pub fn new(stroke: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            stroke: stroke.into(),
            text: text.into(),
        }
    }
}

/// The fixed palette reels are drawn from.
pub fn default_color_schemes() -> Vec<ColorScheme> {
    vec![
        ColorScheme::new("yellow", "white"),
        ColorScheme::new("lime", "white"),
        ColorScheme::new("orange", "white"),
    ]
}
