//! Playback orchestration
//!
//! Wires user intent to the audio service and mirrors audio-service state to
//! the presenter and the UI refresh timer.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

use super::{
    events::{Tick, UserEvent},
    format::{format_position, format_time, FALLBACK_TIME_TEXT},
};
use crate::{
    presentation::Presenter,
    services::{AudioAsset, AudioEvent, AudioService},
    state::{PlayerStatus, TimerPhaseKind},
    tasks::ResumableTimer,
};

/// Default UI refresh interval
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Behaviour switches for [`PlayerController`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    pub tick_interval: Duration,
    /// Zero the slider and label when a track finishes
    pub reset_on_finish: bool,
    /// Alert the user on decode errors instead of only logging them
    pub alert_on_decode_error: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            reset_on_finish: true,
            alert_on_decode_error: true,
        }
    }
}

/// Owns the audio service, the presenter, and the refresh timer
pub struct PlayerController<A: AudioService, P: Presenter> {
    audio: A,
    presenter: P,
    asset: Option<AudioAsset>,
    options: ControllerOptions,
    ticks: UnboundedSender<Tick>,
    timer: Option<ResumableTimer>,
    /// User is holding the slider thumb
    slider_tracking: bool,
    status: PlayerStatus,
}

impl<A: AudioService, P: Presenter> PlayerController<A, P> {
    pub fn new(
        audio: A,
        presenter: P,
        asset: Option<AudioAsset>,
        options: ControllerOptions,
        ticks: UnboundedSender<Tick>,
    ) -> Self {
        Self {
            audio,
            presenter,
            asset,
            options,
            ticks,
            timer: None,
            slider_tracking: false,
            status: PlayerStatus::new(),
        }
    }

    pub fn handle_user_event(&mut self, event: UserEvent) {
        match event {
            UserEvent::PlayControlTapped => self.on_play_control_tapped(),
            UserEvent::SliderChanged { value, is_tracking } => {
                self.on_slider_changed(value, is_tracking)
            }
            UserEvent::Quit => debug!("Quit is handled by the playback task"),
        }
    }

    pub fn handle_audio_event(&mut self, event: AudioEvent) {
        self.status.record_event(event.name());

        match event {
            AudioEvent::DidStartPlaying => self.on_did_start_playing(),
            AudioEvent::DidPause => self.on_did_pause(),
            AudioEvent::DidFinish { successfully } => self.on_did_finish(successfully),
            AudioEvent::DidFailDecoding { error } => {
                self.on_did_fail_decoding(error.to_string())
            }
        }
    }

    /// Refresh the label and slider from the audio position
    ///
    /// Ticks still queued after playback stopped leave the screen alone.
    pub fn on_tick(&mut self) {
        if self.slider_tracking || !self.status.selected {
            return;
        }

        let position = self.audio.current_time();
        let text = format_position(position);
        let value = position.map(|p| p.as_secs_f32()).unwrap_or(0.0);
        self.push_time_text(&text);
        self.push_slider_value(value);
    }

    /// Stop the refresh timer for good
    pub fn shutdown(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.invalidate();
        }
        info!("Player controller shut down");
    }

    pub fn status(&self) -> PlayerStatus {
        let mut status = self.status.clone();
        status.timer = self
            .timer
            .as_ref()
            .map(|timer| timer.phase().kind())
            .unwrap_or(TimerPhaseKind::NotRunning);
        status.position_secs = self
            .audio
            .current_time()
            .map(|p| p.as_secs_f64())
            .unwrap_or(0.0);
        status.duration_secs = self.audio.duration().map(|d| d.as_secs_f64()).unwrap_or(0.0);
        status
    }

    pub fn is_selected(&self) -> bool {
        self.status.selected
    }

    pub fn timer(&self) -> Option<&ResumableTimer> {
        self.timer.as_ref()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    fn on_play_control_tapped(&mut self) {
        if self.status.selected {
            debug!("Play control tapped while selected, pausing");
            self.audio.pause();
        } else {
            debug!("Play control tapped, playing");
            if self.asset.is_none() {
                warn!("No audio asset loaded, playback will not start");
            }
            self.audio.play(self.asset.as_ref());
        }
    }

    fn on_slider_changed(&mut self, value: f32, is_tracking: bool) {
        self.slider_tracking = is_tracking;
        self.push_time_text(&format_time(f64::from(value)));
        if is_tracking {
            return;
        }

        self.push_slider_value(value);
        match Duration::try_from_secs_f32(value) {
            Ok(position) => self.audio.seek(position),
            Err(e) => warn!("Ignoring slider value {}: {}", value, e),
        }
    }

    fn on_did_start_playing(&mut self) {
        info!("Playback started");
        self.push_selected(true);
        self.start_timer();

        let max = self.audio.duration().map(|d| d.as_secs_f32()).unwrap_or(0.0);
        self.status.slider_max = max;
        self.presenter.set_slider_range(0.0, max);
        self.on_tick();
    }

    fn on_did_pause(&mut self) {
        info!("Playback paused");
        self.push_selected(false);
        if let Some(timer) = self.timer.as_mut() {
            timer.pause();
        }
    }

    fn on_did_finish(&mut self, successfully: bool) {
        info!("Playback finished (successfully: {})", successfully);
        self.push_selected(false);
        self.invalidate_timer();

        if self.options.reset_on_finish {
            self.push_slider_value(0.0);
            self.push_time_text(FALLBACK_TIME_TEXT);
        }
    }

    fn on_did_fail_decoding(&mut self, message: String) {
        error!("Audio decode error: {}", message);
        self.push_selected(false);
        self.invalidate_timer();

        let message = format!("Audio player error: {}", message);
        self.status.add_error(message.clone());
        if self.options.alert_on_decode_error {
            self.presenter.show_alert(&message);
        }
    }

    /// Create the refresh timer on first use, then start or resume it
    fn start_timer(&mut self) {
        let interval = self.options.tick_interval;
        let ticks = self.ticks.clone();
        let timer = self.timer.get_or_insert_with(|| {
            debug!("Creating refresh timer ({:?})", interval);
            ResumableTimer::new(interval, true, move || {
                // the receiver only goes away on shutdown
                let _ = ticks.send(Tick);
            })
        });

        if timer.is_paused() {
            timer.resume();
        } else {
            timer.start();
        }
    }

    fn invalidate_timer(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.invalidate();
        }
    }

    fn push_selected(&mut self, selected: bool) {
        self.status.selected = selected;
        self.presenter.set_play_control_selected(selected);
    }

    fn push_time_text(&mut self, text: &str) {
        self.status.time_text = text.to_string();
        self.presenter.set_time_text(text);
    }

    fn push_slider_value(&mut self, value: f32) {
        self.status.slider_value = value;
        self.presenter.set_slider_value(value);
    }
}
