#![deny(unreachable_patterns)]
//! FFmpeg CLI wrapper and media algorithms for reel assembly.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with multiple inputs
//! - Progress parsing from `-progress pipe:2`
//! - Media probing behind a fakeable capability trait
//! - Asset selection, trim-window choice, scene composition,
//!   audio mixing and logo branding
//! - Single-pass reel rendering from a [`reel_models::RenderPlan`]

pub mod audio;
pub mod branding;
pub mod command;
pub mod compose;
pub mod error;
pub mod probe;
pub mod progress;
pub mod render;
pub mod select;
pub mod trim;

pub use audio::{loops_needed, music_filter_chain};
pub use branding::LogoConfig;
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use compose::{crop_offsets, scaled_dimensions, SceneGraphBuilder};
pub use error::{MediaError, MediaResult};
pub use probe::{AudioInfo, FfprobeProber, MediaProber, VideoInfo};
pub use progress::FfmpegProgress;
pub use render::{nvenc_available, FfmpegReelRenderer, ReelRenderer};
pub use select::{select_clips, select_music, SourceClip, AUDIO_EXTENSIONS, VIDEO_EXTENSIONS};
pub use trim::{choose_trim_window, TrimWindow, SHORT_CLIP_FALLBACK_START};
