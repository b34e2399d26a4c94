//! State management module
//!
//! This module contains the timer phase machine and the player status snapshot.

pub mod player_state;
pub mod timer_state;

// Re-export main types
pub use player_state::PlayerStatus;
pub use timer_state::{TimerPhase, TimerPhaseKind};
