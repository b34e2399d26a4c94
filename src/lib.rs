//! Music Player - a single-track audio player screen
//!
//! This library provides a pause/resume-aware periodic timer and the playback
//! controller that uses it to keep a time label and progress slider in step
//! with an audio service.

pub mod config;
pub mod player;
pub mod presentation;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use player::{ControllerOptions, PlayerController};
pub use state::PlayerStatus;
pub use tasks::{playback_task, ResumableTimer};
pub use utils::signals::shutdown_signal;
