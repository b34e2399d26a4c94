//! Background tasks module
//!
//! This module contains the resumable timer and the playback event loop.

pub mod playback;
pub mod resumable_timer;

// Re-export main items
pub use playback::playback_task;
pub use resumable_timer::{ResumableTimer, TimerCallback, MIN_PERIOD};
