//! Clock-driven audio service
//!
//! Probes the asset with lofty for its length and then advances the playback
//! position with the runtime clock. End of track is detected with a one-shot
//! [`ResumableTimer`] that is paused and resumed along with playback.

use std::{
    io::Cursor,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use lofty::{prelude::*, probe::Probe};
use tokio::{sync::mpsc::UnboundedSender, time::Instant};
use tracing::{debug, error, info, warn};

use super::audio::{AudioAsset, AudioError, AudioEvent, AudioService};
use crate::tasks::ResumableTimer;

/// Read the track length out of encoded audio bytes
pub fn probe_duration(data: &[u8]) -> Result<Duration, AudioError> {
    let tagged_file = Probe::new(Cursor::new(data))
        .guess_file_type()
        .map_err(|e| AudioError::Decode(e.to_string()))?
        .read()
        .map_err(|e| AudioError::Decode(e.to_string()))?;

    let duration = tagged_file.properties().duration();
    if duration.is_zero() {
        return Err(AudioError::UnknownDuration);
    }
    Ok(duration)
}

/// One loaded track and its playback clock
struct ClockedPlayer {
    duration: Duration,
    /// Position accumulated before the current playing stretch
    offset: Duration,
    playing_since: Option<Instant>,
    finished: Arc<AtomicBool>,
    events: UnboundedSender<AudioEvent>,
    end_of_track: ResumableTimer,
}

impl ClockedPlayer {
    fn new(asset: &AudioAsset, events: UnboundedSender<AudioEvent>) -> Result<Self, AudioError> {
        let duration = probe_duration(&asset.data)?;
        let finished = Arc::new(AtomicBool::new(false));
        let end_of_track = end_of_track_timer(duration, &finished, &events);

        info!("Created player for '{}' ({:?})", asset.name, duration);
        Ok(Self {
            duration,
            offset: Duration::ZERO,
            playing_since: None,
            finished,
            events,
            end_of_track,
        })
    }

    fn position(&self) -> Duration {
        let running = self
            .playing_since
            .map(|since| since.elapsed())
            .unwrap_or_default();
        (self.offset + running).min(self.duration)
    }

    fn is_playing(&self) -> bool {
        self.playing_since.is_some()
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    fn play(&mut self) {
        if self.is_playing() {
            return;
        }
        self.playing_since = Some(Instant::now());
        self.end_of_track.resume();
    }

    fn pause(&mut self) {
        if let Some(since) = self.playing_since.take() {
            self.offset = (self.offset + since.elapsed()).min(self.duration);
            self.end_of_track.pause();
        }
    }

    fn seek(&mut self, position: Duration) {
        let position = position.min(self.duration);
        self.offset = position;
        self.end_of_track.invalidate();
        self.end_of_track =
            end_of_track_timer(self.duration - position, &self.finished, &self.events);

        if self.is_playing() {
            self.playing_since = Some(Instant::now());
            self.end_of_track.start();
        }
    }
}

fn end_of_track_timer(
    remaining: Duration,
    finished: &Arc<AtomicBool>,
    events: &UnboundedSender<AudioEvent>,
) -> ResumableTimer {
    let finished = Arc::clone(finished);
    let events = events.clone();
    ResumableTimer::new(remaining, false, move || {
        finished.store(true, Ordering::SeqCst);
        if let Err(e) = events.send(AudioEvent::DidFinish { successfully: true }) {
            warn!("Failed to send finish notification: {}", e);
        }
    })
}

/// [`AudioService`] that plays against the runtime clock
pub struct ClockedAudioService {
    player: Option<ClockedPlayer>,
    events: UnboundedSender<AudioEvent>,
}

impl ClockedAudioService {
    pub fn new(events: UnboundedSender<AudioEvent>) -> Self {
        Self {
            player: None,
            events,
        }
    }

    /// Whether a loaded track is currently advancing
    pub fn is_playing(&self) -> bool {
        self.player
            .as_ref()
            .is_some_and(|player| player.is_playing() && !player.is_finished())
    }

    /// Drop a player whose track ran out so the next play starts over
    fn discard_finished_player(&mut self) {
        if self.player.as_ref().is_some_and(ClockedPlayer::is_finished) {
            debug!("Discarding finished player");
            self.player = None;
        }
    }

    fn notify(&self, event: AudioEvent) {
        debug!("Audio service notification: {}", event.name());
        if let Err(e) = self.events.send(event) {
            warn!("Failed to send audio notification: {}", e);
        }
    }
}

impl AudioService for ClockedAudioService {
    /// A finished track keeps reporting its end position until the next
    /// command discards it
    fn current_time(&self) -> Option<Duration> {
        self.player.as_ref().map(ClockedPlayer::position)
    }

    fn duration(&self) -> Option<Duration> {
        self.player.as_ref().map(|player| player.duration)
    }

    fn play(&mut self, asset: Option<&AudioAsset>) {
        self.discard_finished_player();

        if self.player.is_none() {
            let Some(asset) = asset else {
                error!("{}", AudioError::MissingAsset);
                return;
            };
            match ClockedPlayer::new(asset, self.events.clone()) {
                Ok(player) => self.player = Some(player),
                Err(e) => {
                    error!("Failed to create player: {}", e);
                    return;
                }
            }
        }

        if let Some(player) = self.player.as_mut() {
            player.play();
        }
        self.notify(AudioEvent::DidStartPlaying);
    }

    fn pause(&mut self) {
        self.discard_finished_player();
        if let Some(player) = self.player.as_mut() {
            player.pause();
        }
        self.notify(AudioEvent::DidPause);
    }

    fn seek(&mut self, position: Duration) {
        self.discard_finished_player();
        match self.player.as_mut() {
            Some(player) => {
                debug!("Seeking to {:?}", position);
                player.seek(position);
            }
            None => debug!("Ignoring seek without a player"),
        }
    }
}
