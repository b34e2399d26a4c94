//! Player screen module
//!
//! This module contains the playback controller, its event types, and the
//! position formatting shown on the time label.

pub mod controller;
pub mod events;
pub mod format;

// Re-export main types
pub use controller::{ControllerOptions, PlayerController, DEFAULT_TICK_INTERVAL};
pub use events::{Tick, UserEvent};
pub use format::{format_duration, format_position, format_time};
