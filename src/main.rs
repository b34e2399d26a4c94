//! Music Player - a single-track audio player screen
//!
//! This is the main entry point for the music-player application.

use tokio::sync::mpsc;
use tracing::{error, info};

use music_player::{
    config::Config,
    player::PlayerController,
    presentation::{spawn_stdin_reader, ConsolePresenter},
    services::{AudioAsset, ClockedAudioService},
    tasks::playback_task,
    utils::shutdown_signal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so the player line on stdout stays intact
    tracing_subscriber::fmt()
        .with_env_filter(format!("music_player={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting music-player v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: asset={}, tick={}ms", config.asset.display(), config.tick_ms);

    // A missing asset is not fatal; playback simply never starts
    let asset = match AudioAsset::load(&config.asset) {
        Ok(asset) => Some(asset),
        Err(e) => {
            error!("{}", e);
            None
        }
    };

    let (audio_tx, audio_rx) = mpsc::unbounded_channel();
    let (tick_tx, tick_rx) = mpsc::unbounded_channel();
    let (user_tx, user_rx) = mpsc::unbounded_channel();

    let controller = PlayerController::new(
        ClockedAudioService::new(audio_tx),
        ConsolePresenter::stdout(),
        asset,
        config.controller_options(),
        tick_tx,
    );

    info!("Commands:");
    info!("  <enter> | p      - Toggle play/pause");
    info!("  seek <seconds>   - Jump to a position");
    info!("  drag <seconds>   - Preview a position without seeking");
    info!("  q                - Quit");
    spawn_stdin_reader(user_tx);

    let status = playback_task(controller, user_rx, audio_rx, tick_rx, shutdown_signal()).await;

    println!();
    println!("{}", serde_json::to_string_pretty(&status)?);
    info!("Player shutdown complete");
    Ok(())
}
