//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::player::ControllerOptions;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "music-player")]
#[command(about = "Play one audio asset with a pause/resume-aware progress display")]
#[command(version)]
pub struct Config {
    /// Audio asset to play
    #[arg(short, long, default_value = "sound.wav")]
    pub asset: PathBuf,

    /// Progress refresh interval in milliseconds
    #[arg(short, long, default_value = "10")]
    pub tick_ms: u64,

    /// Keep the last position on screen when the track finishes
    #[arg(long)]
    pub no_reset_on_finish: bool,

    /// Only log decode errors instead of alerting
    #[arg(long)]
    pub no_alert: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            tick_interval: self.tick_interval(),
            reset_on_finish: !self.no_reset_on_finish,
            alert_on_decode_error: !self.no_alert,
        }
    }
}
