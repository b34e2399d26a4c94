//! Console command input

use std::{io::BufRead, thread};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::player::UserEvent;

/// Map one line of console input to a user event
///
/// Returns `None` for unrecognised input.
pub fn parse_command(line: &str) -> Option<UserEvent> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or("");

    match command.to_ascii_lowercase().as_str() {
        "" | "p" | "play" | "pause" | "toggle" => Some(UserEvent::PlayControlTapped),
        "q" | "quit" | "exit" => Some(UserEvent::Quit),
        "seek" | "drag" => {
            let value = words.next()?.parse::<f32>().ok()?;
            if !value.is_finite() || value < 0.0 {
                return None;
            }
            Some(UserEvent::SliderChanged {
                value,
                is_tracking: command.eq_ignore_ascii_case("drag"),
            })
        }
        _ => None,
    }
}

/// Forward stdin lines as user events from a dedicated thread
///
/// The channel closes when stdin reaches EOF. A plain thread is used so a
/// pending read never holds up runtime shutdown.
pub fn spawn_stdin_reader(tx: UnboundedSender<UserEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Failed to read stdin: {}", e);
                    break;
                }
            };

            match parse_command(&line) {
                Some(event) => {
                    debug!("User event: {:?}", event);
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                None => warn!("Unknown command: {}", line.trim()),
            }
        }
        debug!("Stdin reader finished");
    })
}
