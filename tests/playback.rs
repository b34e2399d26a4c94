//! End-to-end playback scenarios driven through the playback task

mod common;

use std::time::Duration;

use music_player::{
    player::{ControllerOptions, PlayerController, UserEvent},
    playback_task,
    services::{AudioAsset, ClockedAudioService},
    state::TimerPhaseKind,
};
use tokio::{sync::mpsc, time::sleep};

use common::{silent_wav, RecordingScreen};

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[tokio::test(start_paused = true)]
async fn play_pause_resume_finish() {
    let (audio_tx, audio_rx) = mpsc::unbounded_channel();
    let (tick_tx, tick_rx) = mpsc::unbounded_channel();
    let (user_tx, user_rx) = mpsc::unbounded_channel();

    let screen = RecordingScreen::default();
    let controller = PlayerController::new(
        ClockedAudioService::new(audio_tx),
        screen.clone(),
        Some(AudioAsset::new("sound", silent_wav(8_000, 3))),
        ControllerOptions::default(),
        tick_tx,
    );

    let driver = async {
        user_tx.send(UserEvent::PlayControlTapped).unwrap();
        sleep(ms(1_005)).await;
        assert!(screen.selected());
        assert_eq!(screen.text(), "00:01:00");
        let (min, max) = screen.0.borrow().range;
        assert_eq!(min, 0.0);
        assert!((max - 3.0).abs() < 0.01);

        // pause: control deselected, no more updates
        user_tx.send(UserEvent::PlayControlTapped).unwrap();
        sleep(ms(5_000)).await;
        assert!(!screen.selected());
        assert_eq!(screen.text(), "00:01:00");
        let paused_updates = screen.0.borrow().value_history.len();

        // resume: progress continues from where it stopped
        user_tx.send(UserEvent::PlayControlTapped).unwrap();
        sleep(ms(7)).await;
        assert!(screen.selected());
        assert_eq!(screen.text(), "00:01:01");
        assert!(screen.0.borrow().value_history.len() > paused_updates);

        // finish: deselected and reset to zero
        sleep(ms(3_000)).await;
        assert!(!screen.selected());
        assert_eq!(screen.text(), "00:00:00");
        assert_eq!(screen.value(), 0.0);

        user_tx.send(UserEvent::Quit).unwrap();
    };

    let (status, ()) = tokio::join!(
        playback_task(controller, user_rx, audio_rx, tick_rx, std::future::pending()),
        driver
    );

    assert!(!status.selected);
    assert_eq!(status.timer, TimerPhaseKind::NotRunning);
    assert_eq!(status.last_event.as_deref(), Some("did_finish"));

    let history = screen.0.borrow().value_history.clone();
    let last_progress = history.iter().rposition(|v| *v > 0.0).unwrap();
    assert!(history[..=last_progress].windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test(start_paused = true)]
async fn finish_without_reset_keeps_final_position() {
    let (audio_tx, audio_rx) = mpsc::unbounded_channel();
    let (tick_tx, tick_rx) = mpsc::unbounded_channel();
    let (user_tx, user_rx) = mpsc::unbounded_channel();

    let screen = RecordingScreen::default();
    let options = ControllerOptions {
        reset_on_finish: false,
        ..Default::default()
    };
    let controller = PlayerController::new(
        ClockedAudioService::new(audio_tx),
        screen.clone(),
        Some(AudioAsset::new("sound", silent_wav(8_000, 3))),
        options,
        tick_tx,
    );

    let driver = async {
        user_tx.send(UserEvent::PlayControlTapped).unwrap();
        sleep(ms(3_100)).await;

        assert!(!screen.selected());
        assert_ne!(screen.text(), "00:00:00");
        assert!(screen.value() > 2.9, "slider at {}", screen.value());
        // only the first push, made as playback started, sits at zero
        let history = screen.0.borrow().value_history.clone();
        assert_eq!(history[0], 0.0);
        assert!(history[1..].iter().all(|v| *v > 0.0));

        user_tx.send(UserEvent::Quit).unwrap();
    };

    let (status, ()) = tokio::join!(
        playback_task(controller, user_rx, audio_rx, tick_rx, std::future::pending()),
        driver
    );

    assert!(!status.selected);
    assert_eq!(status.last_event.as_deref(), Some("did_finish"));
    assert_ne!(status.time_text, "00:00:00");
    assert!(status.slider_value > 2.9);
}

#[tokio::test(start_paused = true)]
async fn seek_moves_progress() {
    let (audio_tx, audio_rx) = mpsc::unbounded_channel();
    let (tick_tx, tick_rx) = mpsc::unbounded_channel();
    let (user_tx, user_rx) = mpsc::unbounded_channel();

    let screen = RecordingScreen::default();
    let controller = PlayerController::new(
        ClockedAudioService::new(audio_tx),
        screen.clone(),
        Some(AudioAsset::new("sound", silent_wav(8_000, 5))),
        ControllerOptions::default(),
        tick_tx,
    );

    let driver = async {
        user_tx.send(UserEvent::PlayControlTapped).unwrap();
        sleep(ms(205)).await;

        user_tx
            .send(UserEvent::SliderChanged { value: 4.0, is_tracking: true })
            .unwrap();
        sleep(ms(100)).await;
        // ticks leave the dragged label alone
        assert_eq!(screen.text(), "00:04:00");

        user_tx
            .send(UserEvent::SliderChanged { value: 4.0, is_tracking: false })
            .unwrap();
        sleep(ms(500)).await;
        assert_eq!(screen.text(), "00:04:49");

        user_tx.send(UserEvent::Quit).unwrap();
    };

    let (status, ()) = tokio::join!(
        playback_task(controller, user_rx, audio_rx, tick_rx, std::future::pending()),
        driver
    );

    assert!(status.selected);
    assert!((status.position_secs - 4.5).abs() < 0.001);
    assert_eq!(status.timer, TimerPhaseKind::NotRunning);
}

#[tokio::test(start_paused = true)]
async fn missing_asset_never_starts() {
    let (audio_tx, audio_rx) = mpsc::unbounded_channel();
    let (tick_tx, tick_rx) = mpsc::unbounded_channel();
    let (user_tx, user_rx) = mpsc::unbounded_channel();

    let screen = RecordingScreen::default();
    let controller = PlayerController::new(
        ClockedAudioService::new(audio_tx),
        screen.clone(),
        None,
        ControllerOptions::default(),
        tick_tx,
    );

    user_tx.send(UserEvent::PlayControlTapped).unwrap();
    drop(user_tx);

    let status = playback_task(controller, user_rx, audio_rx, tick_rx, std::future::pending()).await;

    assert!(!screen.selected());
    assert!(!status.selected);
    assert_eq!(status.last_event, None);
    assert_eq!(status.time_text, "00:00:00");
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_task() {
    let (audio_tx, audio_rx) = mpsc::unbounded_channel();
    let (tick_tx, tick_rx) = mpsc::unbounded_channel();
    let (user_tx, user_rx) = mpsc::unbounded_channel();

    let controller = PlayerController::new(
        ClockedAudioService::new(audio_tx),
        RecordingScreen::default(),
        Some(AudioAsset::new("sound", silent_wav(8_000, 10))),
        ControllerOptions::default(),
        tick_tx,
    );

    user_tx.send(UserEvent::PlayControlTapped).unwrap();
    let status = playback_task(controller, user_rx, audio_rx, tick_rx, sleep(ms(2_005))).await;

    assert!(status.selected);
    assert!((status.position_secs - 2.005).abs() < 0.001);
    assert_eq!(status.timer, TimerPhaseKind::NotRunning);
    drop(user_tx);
}
