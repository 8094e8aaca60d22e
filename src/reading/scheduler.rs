//! Playback scheduler: drives a [`PlaybackState`] through time.
//!
//! The scheduler is single-threaded and owns one optional deadline, the
//! moment the current token's display time runs out. The UI event loop uses
//! [`PlaybackScheduler::next_deadline`] as its poll timeout and calls
//! [`PlaybackScheduler::tick`] afterwards. Every transition that moves the
//! position or stops playback clears the deadline before arming a new one, so
//! two advances can never be pending at once.
//!
//! All time-dependent operations take `now` so tests can drive a virtual
//! clock.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::engine::config::{DisplayConfig, TimingConfig};
use crate::reading::ovp::{resolve_pivot, PivotSplit};
use crate::reading::state::{PlaybackPhase, PlaybackState};
use crate::reading::timing::{calculate_word_delay, estimate_remaining_seconds};
use crate::reading::{tokenize_text, Token};

/// What a call to [`PlaybackScheduler::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing scheduled.
    Idle,
    /// Playing, current token still on screen.
    Waiting,
    /// Moved to the next token and re-armed.
    Advanced,
    /// Ran past the last token.
    Finished,
}

pub struct PlaybackScheduler {
    state: PlaybackState,
    timing: TimingConfig,
    pending_advance: Option<Instant>,
}

impl PlaybackScheduler {
    pub fn new(tokens: Vec<Token>, timing: TimingConfig, display: &DisplayConfig) -> Self {
        Self {
            state: PlaybackState::new(tokens, &timing, display),
            timing,
            pending_advance: None,
        }
    }

    pub fn new_with_default_config(tokens: Vec<Token>) -> Self {
        Self::new(tokens, TimingConfig::default(), &DisplayConfig::default())
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.state.phase()
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn position(&self) -> usize {
        self.state.position()
    }

    pub fn wpm(&self) -> u32 {
        self.state.wpm()
    }

    pub fn font_size(&self) -> f32 {
        self.state.font_size()
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.state.current_token()
    }

    /// Pivot split of the token on screen, recomputed on every call.
    pub fn current_pivot(&self) -> PivotSplit<'_> {
        self.current_token()
            .map(|token| resolve_pivot(token.as_str()))
            .unwrap_or_default()
    }

    /// `(position, total)` for progress display.
    pub fn progress(&self) -> (usize, usize) {
        (self.state.position(), self.state.len())
    }

    pub fn time_remaining_secs(&self) -> u64 {
        estimate_remaining_seconds(
            self.state.remaining_tokens(),
            self.state.wpm(),
            self.timing.remaining_correction,
        )
    }

    /// Display time of the current token at the current rate.
    pub fn current_token_duration(&self) -> Option<Duration> {
        self.current_token().map(|token| {
            let ms = calculate_word_delay(token.as_str(), self.state.wpm(), &self.timing);
            Duration::from_micros((ms * 1000.0).round() as u64)
        })
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_advance
    }

    /// Time until the pending advance fires, zero if overdue.
    pub fn time_until_deadline(&self, now: Instant) -> Option<Duration> {
        self.pending_advance
            .map(|due| due.saturating_duration_since(now))
    }

    fn cancel_pending(&mut self) {
        self.pending_advance = None;
    }

    /// Clears any pending advance, then arms a fresh one for the current
    /// token if still playing.
    fn rearm(&mut self, from: Instant) {
        self.cancel_pending();
        if !self.state.is_playing() {
            return;
        }
        if let Some(duration) = self.current_token_duration() {
            self.pending_advance = Some(from + duration);
        }
    }

    pub fn play(&mut self, now: Instant) {
        if self.state.is_playing() {
            return;
        }
        if self.state.start() {
            debug!(position = self.state.position(), wpm = self.state.wpm(), "play");
            self.rearm(now);
        }
    }

    pub fn pause(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.state.stop();
        self.cancel_pending();
        debug!(position = self.state.position(), "pause");
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.state.is_playing() {
            self.pause();
        } else {
            self.play(now);
        }
    }

    pub fn reset(&mut self) {
        self.cancel_pending();
        self.state.rewind();
        debug!("reset");
    }

    /// Jumps to `floor(fraction * len)`. Keeps playing (with a fresh
    /// deadline) unless the jump lands on the end.
    pub fn seek(&mut self, fraction: f64, now: Instant) {
        let target = self.state.position_for_fraction(fraction);
        self.cancel_pending();
        self.state.set_position(target);
        self.rearm(now);
        debug!(fraction, position = target, "seek");
    }

    /// Changes the rate for every later duration. The deadline already armed
    /// for the token on screen is left as is.
    pub fn set_rate(&mut self, wpm: u32) {
        self.state.set_wpm(wpm);
        debug!(wpm = self.state.wpm(), "rate");
    }

    pub fn adjust_rate(&mut self, delta: i32) {
        self.state.adjust_wpm(delta);
        debug!(wpm = self.state.wpm(), "rate");
    }

    /// Keyboard rate step: moves by the configured step, never past the UI
    /// ceiling on the way up.
    pub fn step_rate(&mut self, faster: bool) {
        let step = self.timing.wpm_step as i64;
        let current = self.state.wpm() as i64;
        let next = if faster {
            (current + step).min(self.timing.max_ui_wpm.max(self.state.wpm()) as i64)
        } else {
            current - step
        };
        self.state.set_wpm(next.clamp(0, u32::MAX as i64) as u32);
        debug!(wpm = self.state.wpm(), "rate");
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.state.set_font_size(size);
    }

    pub fn adjust_font_size(&mut self, delta: f32) {
        self.state.adjust_font_size(delta);
    }

    /// New source text: drops the pending advance and starts over, idle.
    /// Rate and font size carry over.
    pub fn replace_text(&mut self, text: &str) {
        self.replace_tokens(tokenize_text(text));
    }

    pub fn replace_tokens(&mut self, tokens: Vec<Token>) {
        self.cancel_pending();
        self.state.replace_tokens(tokens);
        debug!(tokens = self.state.len(), "text replaced");
    }

    /// Fires the pending advance if it is due.
    ///
    /// The next deadline counts from when the previous one was due, not from
    /// `now`, so a late tick does not stretch every later word. It is never
    /// armed in the past.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if !self.state.is_playing() {
            return TickOutcome::Idle;
        }

        let due = match self.pending_advance {
            Some(due) => due,
            None => {
                // playing without a deadline cannot persist; arm one
                self.rearm(now);
                return TickOutcome::Waiting;
            }
        };

        if now < due {
            return TickOutcome::Waiting;
        }

        self.cancel_pending();
        self.state.advance();
        if self.state.is_finished() {
            debug!(position = self.state.position(), "finished");
            return TickOutcome::Finished;
        }

        self.rearm(due);
        if let Some(next) = self.pending_advance {
            if next < now {
                self.pending_advance = Some(now);
            }
        }
        TickOutcome::Advanced
    }
}
