//! Logo branding overlay.
//!
//! The logo is scaled (aspect preserved) to a fixed fraction of the
//! output height and composited bottom-center with a fixed pixel margin,
//! held for the full video duration. A missing logo file skips branding
//! with a warning rather than failing the reel.

use std::path::{Path, PathBuf};

use tracing::warn;

use reel_models::RenderSettings;

/// Configuration for the logo overlay.
#[derive(Debug, Clone)]
pub struct LogoConfig {
    /// Path to the logo image (PNG with transparency).
    pub image_path: PathBuf,
    /// Overlay height in pixels.
    pub height: u32,
    /// Offset from the bottom edge, pixels.
    pub bottom_margin: u32,
}

impl LogoConfig {
    /// Derive the overlay geometry from the render settings.
    pub fn from_settings(image_path: impl Into<PathBuf>, settings: &RenderSettings) -> Self {
        Self {
            image_path: image_path.into(),
            height: settings.logo_height(),
            bottom_margin: settings.logo_bottom_margin,
        }
    }

    /// Check if the logo image exists.
    pub fn is_available(&self) -> bool {
        Path::new(&self.image_path).is_file()
    }

    /// Filter fragments overlaying the logo onto `input_label`, labeled
    /// `[branded]`. Returns `None` (with a warning) when the image is
    /// missing.
    pub fn overlay_chain(&self, logo_input: usize, input_label: &str) -> Option<String> {
        if !self.is_available() {
            warn!(logo = %self.image_path.display(), "Logo file not found, skipping branding");
            return None;
        }

        // -2 keeps the aspect ratio with an even width
        Some(format!(
            "[{logo}:v]scale=-2:{height}[logo];\
             [{input}][logo]overlay=(W-w)/2:H-h-{margin}:format=auto[branded]",
            logo = logo_input,
            height = self.height,
            input = input_label,
            margin = self.bottom_margin,
        ))
    }
}
