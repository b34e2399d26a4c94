//! Playback event loop task

use std::future::Future;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use crate::{
    player::{PlayerController, Tick, UserEvent},
    presentation::Presenter,
    services::{AudioEvent, AudioService},
    state::PlayerStatus,
};

/// Drive the controller from user input, audio notifications and timer ticks
///
/// Every handler runs on this one task. Returns the final status once the
/// user quits, the input channel closes, or `shutdown` resolves.
pub async fn playback_task<A, P, F>(
    mut controller: PlayerController<A, P>,
    mut user_rx: UnboundedReceiver<UserEvent>,
    mut audio_rx: UnboundedReceiver<AudioEvent>,
    mut tick_rx: UnboundedReceiver<Tick>,
    shutdown: F,
) -> PlayerStatus
where
    A: AudioService,
    P: Presenter,
    F: Future<Output = ()>,
{
    info!("Starting playback task");
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested, stopping playback task");
                break;
            }

            event = user_rx.recv() => match event {
                Some(UserEvent::Quit) | None => {
                    info!("User left the player");
                    break;
                }
                Some(event) => controller.handle_user_event(event),
            },

            Some(event) = audio_rx.recv() => {
                debug!("Playback task received audio event: {}", event.name());
                controller.handle_audio_event(event);
            }

            Some(Tick) = tick_rx.recv() => controller.on_tick(),
        }
    }

    controller.shutdown();
    controller.status()
}
