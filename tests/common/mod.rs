//! Shared helpers for integration tests

#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use music_player::presentation::Presenter;

/// Mono 16-bit PCM WAV of silence
pub fn silent_wav(sample_rate: u32, seconds: u32) -> Vec<u8> {
    let data_len = sample_rate * seconds * 2;
    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.resize(44 + data_len as usize, 0);
    wav
}

#[derive(Debug, Default)]
pub struct Screen {
    pub selected: bool,
    pub text: String,
    pub value: f32,
    pub range: (f32, f32),
    pub value_history: Vec<f32>,
    pub alerts: Vec<String>,
}

/// Presenter whose screen stays readable after it is moved into a controller
#[derive(Clone, Default)]
pub struct RecordingScreen(pub Rc<RefCell<Screen>>);

impl RecordingScreen {
    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn value(&self) -> f32 {
        self.0.borrow().value
    }

    pub fn selected(&self) -> bool {
        self.0.borrow().selected
    }
}

impl Presenter for RecordingScreen {
    fn set_slider_range(&mut self, min: f32, max: f32) {
        self.0.borrow_mut().range = (min, max);
    }

    fn set_slider_value(&mut self, value: f32) {
        let mut screen = self.0.borrow_mut();
        screen.value = value;
        screen.value_history.push(value);
    }

    fn set_time_text(&mut self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    fn set_play_control_selected(&mut self, selected: bool) {
        self.0.borrow_mut().selected = selected;
    }

    fn show_alert(&mut self, message: &str) {
        self.0.borrow_mut().alerts.push(message.to_string());
    }
}
