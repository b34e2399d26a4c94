//! Playback position formatting

use std::time::Duration;

/// Label text shown when no position is available
pub const FALLBACK_TIME_TEXT: &str = "00:00:00";

/// Format a position in seconds as `MM:SS:cc` (minutes, seconds, hundredths)
///
/// The input is first rounded to the nearest nanosecond, so values like
/// `0.29` whose binary form sits just below a hundredth still land on it.
/// Fields are then truncated, not rounded. Minutes are not capped at 59.
/// Negative or non-finite input renders as [`FALLBACK_TIME_TEXT`].
pub fn format_time(seconds: f64) -> String {
    match Duration::try_from_secs_f64(seconds) {
        Ok(position) => format_duration(position),
        Err(_) => FALLBACK_TIME_TEXT.to_string(),
    }
}

/// Format an optional position, falling back to `00:00:00`
pub fn format_position(position: Option<Duration>) -> String {
    position
        .map(format_duration)
        .unwrap_or_else(|| FALLBACK_TIME_TEXT.to_string())
}

/// Format a duration as `MM:SS:cc`
pub fn format_duration(position: Duration) -> String {
    let total_secs = position.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    let hundredths = position.subsec_nanos() / 10_000_000;
    format!("{:02}:{:02}:{:02}", minutes, seconds, hundredths)
}
