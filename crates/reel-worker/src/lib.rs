//! Batch reel generation worker.
//!
//! This crate provides:
//! - Environment-driven configuration
//! - Quote-file loading
//! - Render-plan building (selection, trimming, colors, hook, music)
//! - The sequential batch orchestrator with per-item failure isolation
//! - Upload-request assembly and checkpoint updates

pub mod batch;
pub mod config;
pub mod error;
pub mod planner;
pub mod quotes;
pub mod upload;

pub use batch::{generate_batch, BatchFailure, BatchReport, ReelArtifact};
pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use planner::{build_plan, HOOK_PHRASES};
pub use quotes::load_quotes;
pub use upload::schedule_uploads;
