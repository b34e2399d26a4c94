//! External service module
//!
//! This module contains the audio service contract and its clock-driven
//! implementation.

pub mod audio;
pub mod clocked;

// Re-export main types
pub use audio::{AudioAsset, AudioError, AudioEvent, AudioService};
pub use clocked::{probe_duration, ClockedAudioService};
