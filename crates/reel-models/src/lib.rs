//! Shared data models for the reelforge pipeline.
//!
//! This crate provides:
//! - Quote records (the external input unit for one reel)
//! - Color schemes for caption/hook rendering
//! - Render plans (the value object that fully determines one output)
//! - Render settings and encoding configuration
//! - Upload requests handed to the publishing boundary

pub mod color;
pub mod encoding;
pub mod plan;
pub mod quote;
pub mod settings;
pub mod upload;

pub use color::{default_color_schemes, ColorScheme};
pub use encoding::EncodingConfig;
pub use plan::{HookPlan, MusicPlan, RenderPlan, ScenePlan};
pub use quote::{QuoteError, QuoteRecord, CAPTIONS_PER_REEL};
pub use settings::{RenderSettings, SceneShortfall};
pub use upload::{default_video_tags, UploadRequest};
