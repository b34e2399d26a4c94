//! Timer phase structure and management

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Lifecycle phase of a resumable timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerPhase {
    /// Never started, invalidated, or a one-shot that already fired
    #[default]
    NotRunning,
    /// A run is armed; `started_at` is when it began
    Running { started_at: Instant },
    /// Cancelled by `pause`
    Paused {
        /// How long the run had lasted
        elapsed_since_pause: Duration,
        /// Delay that was left until the next undelivered fire
        until_next_fire: Duration,
    },
}

impl TimerPhase {
    pub fn kind(&self) -> TimerPhaseKind {
        match self {
            TimerPhase::NotRunning => TimerPhaseKind::NotRunning,
            TimerPhase::Running { .. } => TimerPhaseKind::Running,
            TimerPhase::Paused { .. } => TimerPhaseKind::Paused,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TimerPhase::Running { .. })
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, TimerPhase::Paused { .. })
    }
}

/// Serializable summary of a [`TimerPhase`] for status snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhaseKind {
    #[default]
    NotRunning,
    Running,
    Paused,
}
