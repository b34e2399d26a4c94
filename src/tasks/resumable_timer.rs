//! Pausable periodic timer background task
//!
//! A [`ResumableTimer`] schedules a callback once or periodically on the tokio
//! runtime. Unlike a plain interval, pausing it remembers how far the current
//! run had progressed, so resuming fires at the originally scheduled point
//! instead of starting the whole interval over.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{
    task::JoinHandle,
    time::{self, Instant},
};
use tracing::debug;

use crate::state::TimerPhase;

/// Shortest period a repeating timer will tick at
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Callback invoked on every fire
pub type TimerCallback = Arc<dyn Fn() + Send + Sync + 'static>;

/// Restartable, pausable callback scheduler
///
/// Every arming operation spawns a task on the current tokio runtime, so they
/// must be called from within one. Cancellation aborts that task before
/// returning.
pub struct ResumableTimer {
    /// Configured period between fires of a repeating run
    interval: Duration,
    /// Delay until the next fire when a run is armed
    interval_remaining: Duration,
    repeats: bool,
    callback: TimerCallback,
    phase: TimerPhase,
    /// Deadline of the next undelivered fire, advanced by the run task itself
    next_fire: Arc<Mutex<Instant>>,
    /// Scheduling handle of the armed run
    handle: Option<JoinHandle<()>>,
}

impl ResumableTimer {
    /// Create a timer in the not-running state. Nothing is scheduled yet.
    pub fn new<F>(interval: Duration, repeats: bool, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            interval,
            interval_remaining: interval,
            repeats,
            callback: Arc::new(callback),
            phase: TimerPhase::NotRunning,
            next_fire: Arc::new(Mutex::new(Instant::now())),
            handle: None,
        }
    }

    /// Begin scheduling at the current remaining interval, replacing any armed run
    pub fn start(&mut self) {
        debug!("Starting timer: remaining={:?}, repeats={}", self.interval_remaining, self.repeats);
        self.arm();
    }

    /// Cancel the armed run and remember how long it had been running
    ///
    /// Does nothing when no run is armed.
    pub fn pause(&mut self) {
        match self.phase() {
            TimerPhase::Running { started_at } => {
                let now = Instant::now();
                let elapsed_since_pause = now.saturating_duration_since(started_at);
                let until_next_fire = self.next_fire().saturating_duration_since(now);
                self.cancel();
                self.phase = TimerPhase::Paused {
                    elapsed_since_pause,
                    until_next_fire,
                };
                debug!(
                    "Timer paused after {:?}, next fire due in {:?}",
                    elapsed_since_pause, until_next_fire
                );
            }
            phase => debug!("Ignoring pause in phase {:?}", phase.kind()),
        }
    }

    /// Re-arm with whatever was left of the interval when the timer was paused
    ///
    /// A timer that was never paused starts with its full remaining interval.
    /// An armed timer is left alone.
    pub fn resume(&mut self) {
        match self.phase() {
            TimerPhase::Running { .. } => {
                debug!("Ignoring resume of a running timer");
                return;
            }
            TimerPhase::Paused { until_next_fire, .. } => {
                self.interval_remaining = until_next_fire;
            }
            TimerPhase::NotRunning => {}
        }

        debug!("Resuming timer: remaining={:?}", self.interval_remaining);
        self.arm();
    }

    /// Cancel the armed run for good; no further fires happen
    pub fn invalidate(&mut self) {
        debug!("Invalidating timer");
        self.cancel();
        self.phase = TimerPhase::NotRunning;
    }

    /// Re-arm from now at the current remaining interval
    pub fn reset(&mut self) {
        debug!("Resetting timer: remaining={:?}", self.interval_remaining);
        self.arm();
    }

    /// True only after `pause` and before the next arming operation
    pub fn is_paused(&self) -> bool {
        self.phase().is_paused()
    }

    /// True while a scheduling handle is armed and has not finished
    pub fn is_running(&self) -> bool {
        self.phase().is_running()
    }

    /// Current phase; a one-shot run that already fired reports `NotRunning`
    pub fn phase(&self) -> TimerPhase {
        match self.phase {
            TimerPhase::Running { .. } if !self.handle_active() => TimerPhase::NotRunning,
            phase => phase,
        }
    }

    pub fn interval_remaining(&self) -> Duration {
        self.interval_remaining
    }

    fn handle_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    fn period(&self) -> Duration {
        self.interval.max(MIN_PERIOD)
    }

    fn next_fire(&self) -> Instant {
        match self.next_fire.lock() {
            Ok(deadline) => *deadline,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn arm(&mut self) {
        self.cancel();

        let started_at = Instant::now();
        let first_fire = started_at + self.interval_remaining;
        let period = self.period();
        let repeats = self.repeats;
        let callback = Arc::clone(&self.callback);

        // A fresh cell per run so nothing from a cancelled run can leak in
        self.next_fire = Arc::new(Mutex::new(first_fire));
        let next_fire = Arc::clone(&self.next_fire);

        let handle = tokio::spawn(async move {
            let mut deadline = first_fire;
            loop {
                time::sleep_until(deadline).await;
                if !repeats {
                    callback();
                    return;
                }

                // Publish the following deadline in the same poll as the
                // callback, so a pause never sees a delivered fire as pending
                deadline = following_deadline(deadline, period, Instant::now());
                if let Ok(mut next) = next_fire.lock() {
                    *next = deadline;
                }
                callback();
            }
        });

        self.handle = Some(handle);
        self.phase = TimerPhase::Running { started_at };
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Next fire after `deadline`, skipping any periods that were missed by `now`
fn following_deadline(deadline: Instant, period: Duration, now: Instant) -> Instant {
    let next = deadline + period;
    if next > now {
        return next;
    }
    let skipped = (now - next).as_nanos() / period.as_nanos() + 1;
    next + Duration::from_nanos((skipped * period.as_nanos()) as u64)
}

impl Drop for ResumableTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for ResumableTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResumableTimer")
            .field("interval", &self.interval)
            .field("interval_remaining", &self.interval_remaining)
            .field("repeats", &self.repeats)
            .field("phase", &self.phase())
            .finish()
    }
}
