//! Audio asset service contract

use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;

/// Errors raised while loading or decoding an audio asset
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("No audio asset was supplied")]
    MissingAsset,

    #[error("Failed to read audio asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode audio asset: {0}")]
    Decode(String),

    #[error("Audio asset has no playable duration")]
    UnknownDuration,
}

/// Raw bytes of a bundled sound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioAsset {
    pub name: String,
    pub data: Vec<u8>,
}

impl AudioAsset {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Read an asset from disk, naming it after the file stem
    pub fn load(path: &Path) -> Result<Self, AudioError> {
        let data = std::fs::read(path).map_err(|source| AudioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("sound")
            .to_string();

        debug!("Loaded audio asset '{}' ({} bytes)", name, data.len());
        Ok(Self::new(name, data))
    }
}

/// Notifications emitted by an [`AudioService`]
#[derive(Debug)]
pub enum AudioEvent {
    DidStartPlaying,
    DidPause,
    DidFinish { successfully: bool },
    DidFailDecoding { error: AudioError },
}

impl AudioEvent {
    /// Short name used for status tracking and logs
    pub fn name(&self) -> &'static str {
        match self {
            AudioEvent::DidStartPlaying => "did_start_playing",
            AudioEvent::DidPause => "did_pause",
            AudioEvent::DidFinish { .. } => "did_finish",
            AudioEvent::DidFailDecoding { .. } => "did_fail_decoding",
        }
    }
}

/// Playable audio asset service
///
/// Implementations report state changes as [`AudioEvent`]s on a channel handed
/// to them at construction rather than through return values.
pub trait AudioService {
    /// Current playback position, `None` when no player exists
    fn current_time(&self) -> Option<Duration>;

    /// Length of the loaded track, `None` when no player exists
    fn duration(&self) -> Option<Duration>;

    /// Start or continue playback, creating the player from `asset` if needed
    fn play(&mut self, asset: Option<&AudioAsset>);

    fn pause(&mut self);

    /// Move the playback position, clamped to the track length
    fn seek(&mut self, position: Duration);
}
