//! Single-line terminal rendering of the player screen

use std::io::{self, Write};
use tracing::warn;

use super::Presenter;
use crate::player::format::FALLBACK_TIME_TEXT;

const BAR_WIDTH: usize = 30;

/// Redraws `▶ MM:SS:cc [====------]` in place on a writer
pub struct ConsolePresenter<W: Write> {
    out: W,
    selected: bool,
    time_text: String,
    slider_min: f32,
    slider_max: f32,
    slider_value: f32,
}

impl ConsolePresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            selected: false,
            time_text: FALLBACK_TIME_TEXT.to_string(),
            slider_min: 0.0,
            slider_max: 0.0,
            slider_value: 0.0,
        }
    }

    /// Render the current screen state as one line
    pub fn line(&self) -> String {
        let icon = if self.selected { '⏸' } else { '▶' };
        format!("{} {} [{}]", icon, self.time_text, self.bar())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn bar(&self) -> String {
        let span = self.slider_max - self.slider_min;
        let progress = if span > 0.0 {
            ((self.slider_value - self.slider_min) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let filled = (progress * BAR_WIDTH as f32).round() as usize;
        format!("{}{}", "=".repeat(filled), "-".repeat(BAR_WIDTH - filled))
    }

    fn redraw(&mut self) {
        let line = self.line();
        if let Err(e) = write!(self.out, "\r{}", line).and_then(|_| self.out.flush()) {
            warn!("Failed to draw player line: {}", e);
        }
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn set_slider_range(&mut self, min: f32, max: f32) {
        self.slider_min = min;
        self.slider_max = max;
        self.redraw();
    }

    fn set_slider_value(&mut self, value: f32) {
        self.slider_value = value;
        self.redraw();
    }

    fn set_time_text(&mut self, text: &str) {
        self.time_text = text.to_string();
        self.redraw();
    }

    fn set_play_control_selected(&mut self, selected: bool) {
        self.selected = selected;
        self.redraw();
    }

    fn show_alert(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "\n[alert] {}", message).and_then(|_| self.out.flush()) {
            warn!("Failed to show alert: {}", e);
        }
    }
}
