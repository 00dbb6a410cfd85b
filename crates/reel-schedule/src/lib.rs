//! Publish-slot scheduling and checkpoint persistence.
//!
//! Converts a count of pending reels into a strictly increasing sequence
//! of future release timestamps, walking a fixed list of daily local-time
//! slots; continuity across runs flows through a single persisted
//! checkpoint timestamp.

pub mod checkpoint;
pub mod scheduler;

pub use checkpoint::{read_checkpoint, write_checkpoint, ScheduleError, ScheduleResult};
pub use scheduler::{default_publish_slots, default_utc_offset, next_publish_times};
