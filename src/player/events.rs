//! Events delivered to the playback task

/// User intent emitted by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserEvent {
    /// Play control tapped; means play or pause depending on its selection
    PlayControlTapped,
    /// Slider moved to `value` seconds; `is_tracking` while the thumb is held
    SliderChanged { value: f32, is_tracking: bool },
    /// Leave the player
    Quit,
}

/// One fire of the UI refresh timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick;
