use crate::engine::config::{DisplayConfig, TimingConfig};
use crate::reading::{tokenize_text, Token};

/// Where playback stands, derived from position and the playing flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Idle,
    Playing,
    Paused,
    Finished,
}

/// Tokens plus reader position and preferences.
///
/// `position == tokens.len()` is the finished state and is never playing.
/// Fields are private so every mutation goes through a method that keeps
/// those rules.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    tokens: Vec<Token>,
    position: usize,
    is_playing: bool,
    wpm: u32,
    min_wpm: u32,
    font_size: f32,
    font_min: f32,
    font_max: f32,
}

impl PlaybackState {
    pub fn new(tokens: Vec<Token>, timing: &TimingConfig, display: &DisplayConfig) -> Self {
        let font_min = *display.font_size_range.start();
        let font_max = *display.font_size_range.end();
        Self {
            tokens,
            position: 0,
            is_playing: false,
            wpm: timing.wpm.max(timing.min_wpm),
            min_wpm: timing.min_wpm,
            font_size: display.font_size.clamp(font_min, font_max),
            font_min,
            font_max,
        }
    }

    pub fn new_with_default_config(tokens: Vec<Token>) -> Self {
        Self::new(tokens, &TimingConfig::default(), &DisplayConfig::default())
    }

    pub fn from_text(text: &str, timing: &TimingConfig, display: &DisplayConfig) -> Self {
        Self::new(tokenize_text(text), timing, display)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn phase(&self) -> PlaybackPhase {
        if self.is_playing {
            PlaybackPhase::Playing
        } else if self.position == 0 {
            // also covers empty text: nothing read yet, so nothing finished
            PlaybackPhase::Idle
        } else if self.is_finished() {
            PlaybackPhase::Finished
        } else {
            PlaybackPhase::Paused
        }
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub fn remaining_tokens(&self) -> usize {
        self.tokens.len() - self.position
    }

    /// Swaps in new tokens, rewinding to the start and stopping playback.
    pub fn replace_tokens(&mut self, tokens: Vec<Token>) {
        self.tokens = tokens;
        self.position = 0;
        self.is_playing = false;
    }

    /// Starts playing unless already at the end. Returns whether it is playing.
    pub fn start(&mut self) -> bool {
        if !self.is_finished() {
            self.is_playing = true;
        }
        self.is_playing
    }

    pub fn stop(&mut self) {
        self.is_playing = false;
    }

    pub fn rewind(&mut self) {
        self.position = 0;
        self.is_playing = false;
    }

    /// Moves to `position`, clamped into `0..=len`. Landing on the end stops playback.
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.tokens.len());
        if self.is_finished() {
            self.is_playing = false;
        }
    }

    /// `floor(fraction * len)`; non-finite fractions count as 0.
    pub fn position_for_fraction(&self, fraction: f64) -> usize {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let len = self.tokens.len();
        ((fraction * len as f64).floor() as usize).min(len)
    }

    /// Steps to the next token, or to the finished state after the last one.
    pub fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        } else {
            self.set_position(self.tokens.len());
        }
    }

    pub fn set_wpm(&mut self, wpm: u32) {
        self.wpm = wpm.max(self.min_wpm);
    }

    pub fn adjust_wpm(&mut self, delta: i32) {
        let new_wpm = (self.wpm as i64 + delta as i64).clamp(0, u32::MAX as i64) as u32;
        self.set_wpm(new_wpm);
    }

    pub fn set_font_size(&mut self, size: f32) {
        if size.is_finite() {
            self.font_size = size.clamp(self.font_min, self.font_max);
        }
    }

    pub fn adjust_font_size(&mut self, delta: f32) {
        self.set_font_size(self.font_size + delta);
    }
}
