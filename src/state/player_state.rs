//! Player status snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TimerPhaseKind;
use crate::player::format::FALLBACK_TIME_TEXT;

/// Everything the screen currently shows, plus the last thing that happened to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatus {
    /// Play control selected (audio playing)
    pub selected: bool,
    pub position_secs: f64,
    pub duration_secs: f64,
    /// Text last pushed to the time label
    pub time_text: String,
    pub slider_value: f32,
    pub slider_max: f32,
    pub timer: TimerPhaseKind,
    pub last_event: Option<String>,
    pub last_event_time: Option<DateTime<Utc>>,
    /// Errors reported to the user
    pub errors: Vec<String>,
}

impl PlayerStatus {
    pub fn new() -> Self {
        Self {
            selected: false,
            position_secs: 0.0,
            duration_secs: 0.0,
            time_text: FALLBACK_TIME_TEXT.to_string(),
            slider_value: 0.0,
            slider_max: 0.0,
            timer: TimerPhaseKind::NotRunning,
            last_event: None,
            last_event_time: None,
            errors: Vec::new(),
        }
    }

    /// Remember the most recent event and when it happened
    pub fn record_event(&mut self, event: &str) {
        self.last_event = Some(event.to_string());
        self.last_event_time = Some(Utc::now());
    }

    pub fn add_error(&mut self, error: String) {
        tracing::warn!("Recording player error: {}", error);
        self.errors.push(error);
    }
}

impl Default for PlayerStatus {
    fn default() -> Self {
        Self::new()
    }
}
