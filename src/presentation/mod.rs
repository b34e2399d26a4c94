//! Presentation layer module
//!
//! The controller pushes display updates through [`Presenter`]; user intent
//! comes back as [`crate::player::UserEvent`]s.

pub mod console;
pub mod input;

// Re-export main types
pub use console::ConsolePresenter;
pub use input::{parse_command, spawn_stdin_reader};

/// Receiver of display update commands
pub trait Presenter {
    fn set_slider_range(&mut self, min: f32, max: f32);

    fn set_slider_value(&mut self, value: f32);

    fn set_time_text(&mut self, text: &str);

    fn set_play_control_selected(&mut self, selected: bool);

    /// Show a dismissible message to the user
    fn show_alert(&mut self, message: &str);
}
