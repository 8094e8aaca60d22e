use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use tracing::{info, warn};

use super::event::AppEvent;
use super::mode::AppMode;
use super::render_state::{context_window, RenderState, StatusMessage, WordParts};
use crate::engine::config::Config;
use crate::input::{self, LoadError, LoadedText};
use crate::reading::{PlaybackPhase, PlaybackScheduler, TickOutcome};
use crate::transform::{
    SubmitError, TextTransformer, TransformCompletion, TransformMode, TransformRequest,
    TransformWorker,
};
use crate::ui::command::{command_to_app_event, parse_command};

pub const HELP_TEXT: &str = "space play/pause · r reset · +/- speed · [/] size · 0-9 seek · \
s summarize · o optimize · : commands (@file, @@, :gen topic, :wpm n) · q quit";

pub struct App {
    mode: AppMode,
    scheduler: PlaybackScheduler,
    /// Text behind the current tokens, kept whole for transform requests
    text: String,
    source: Option<String>,
    worker: TransformWorker,
    status: Option<StatusMessage>,
    command_input: String,
    config: Config,
}

impl App {
    pub fn new(config: Config, transformer: Arc<dyn TextTransformer>) -> Self {
        let scheduler =
            PlaybackScheduler::new(Vec::new(), config.timing.clone(), &config.display);
        Self {
            mode: AppMode::Command,
            scheduler,
            text: String::new(),
            source: None,
            worker: TransformWorker::new(transformer),
            status: None,
            command_input: String::new(),
            config,
        }
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn scheduler(&self) -> &PlaybackScheduler {
        &self.scheduler
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn command_input(&self) -> &str {
        &self.command_input
    }

    pub fn is_generating(&self) -> bool {
        self.worker.is_generating()
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => self.mode = AppMode::Quit,
            AppEvent::Help => self.status = Some(StatusMessage::info(HELP_TEXT)),
            AppEvent::LoadFile(path) => {
                let result = input::load_path(&path);
                self.apply_load(result);
            }
            AppEvent::LoadClipboard => {
                let result = input::clipboard::load();
                self.apply_load(result);
            }
            AppEvent::ReadText(text) => {
                let result = LoadedText::new(text, "inline");
                self.apply_load(result);
            }
            AppEvent::Transform(mode) => self.request_transform(mode),
            AppEvent::Generate(topic) => self.request_generate(topic),
            AppEvent::SetWpm(wpm) => {
                self.scheduler.set_rate(wpm);
                self.status = Some(StatusMessage::info(format!(
                    "{} wpm",
                    self.scheduler.wpm()
                )));
                self.enter_reading_if_loaded();
            }
            AppEvent::Resume => self.enter_reading_if_loaded(),
            AppEvent::InvalidCommand(input) => {
                self.status = Some(StatusMessage::error(format!(
                    "Unknown command: {:?} (:h for help)",
                    input
                )));
            }
        }
    }

    fn enter_reading_if_loaded(&mut self) {
        if self.source.is_some() {
            self.mode = AppMode::Reading;
        }
    }

    fn apply_load(&mut self, result: Result<LoadedText, LoadError>) {
        match result {
            Ok(loaded) => {
                // a transform still running for the old text must not land
                self.worker.supersede();
                self.replace_text(loaded.text, loaded.source);
            }
            Err(e) => {
                warn!(error = %e, "load failed");
                self.status = Some(StatusMessage::error(e.to_string()));
            }
        }
    }

    /// Swaps the displayed text wholesale and returns to the reader, idle.
    fn replace_text(&mut self, text: String, source: String) {
        self.scheduler.replace_text(&text);
        let words = self.scheduler.state().len();
        info!(source = %source, words, "text loaded");
        self.status = Some(StatusMessage::info(format!(
            "{} words from {} · space to start",
            words, source
        )));
        self.text = text;
        self.source = Some(source);
        self.mode = AppMode::Reading;
    }

    fn request_transform(&mut self, mode: TransformMode) {
        if self.text.trim().is_empty() {
            self.status = Some(StatusMessage::error(format!(
                "Nothing to {}: load some text first",
                mode
            )));
            return;
        }
        self.submit(TransformRequest::Transform {
            text: self.text.clone(),
            mode,
        });
    }

    fn request_generate(&mut self, topic: String) {
        self.submit(TransformRequest::Generate { topic });
    }

    fn submit(&mut self, request: TransformRequest) {
        let label = request.label();
        match self.worker.submit(request) {
            Ok(_) => {
                self.status = Some(StatusMessage::info(format!("Generating ({})…", label)));
            }
            Err(SubmitError::Busy) => {
                self.status = Some(StatusMessage::error(SubmitError::Busy.to_string()));
            }
            Err(e) => {
                warn!(error = %e, label, "transform not submitted");
                self.status = Some(StatusMessage::error(e.to_string()));
            }
        }
    }

    /// Applies a finished transform, if one has arrived.
    pub fn poll_transforms(&mut self) -> bool {
        match self.worker.poll() {
            Some(completion) => {
                self.apply_completion(completion);
                true
            }
            None => false,
        }
    }

    /// Blocks up to `timeout` for the running transform and applies it.
    pub fn wait_for_transform(&mut self, timeout: Duration) -> bool {
        match self.worker.wait(timeout) {
            Some(completion) => {
                self.apply_completion(completion);
                true
            }
            None => false,
        }
    }

    fn apply_completion(&mut self, completion: TransformCompletion) {
        match completion.result {
            Ok(text) => {
                let source = format!("{} result", completion.label);
                self.replace_text(text, source);
            }
            Err(e) => {
                // existing text stays as it was
                self.status = Some(StatusMessage::error(e.user_message()));
            }
        }
    }

    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let outcome = self.scheduler.tick(now);
        if outcome == TickOutcome::Finished {
            self.status = Some(StatusMessage::info("Finished · r to restart"));
        }
        outcome
    }

    /// How long the event loop may block before the next advance is due.
    pub fn poll_timeout(&self, now: Instant, frame: Duration) -> Duration {
        match self.scheduler.time_until_deadline(now) {
            Some(until) => until.min(frame),
            None => frame,
        }
    }

    pub fn seek_fraction(&mut self, fraction: f64, now: Instant) {
        if self.mode == AppMode::Reading {
            self.scheduler.seek(fraction, now);
        }
    }

    pub fn handle_keypress(&mut self, key: KeyCode, now: Instant) {
        match self.mode {
            AppMode::Command => self.handle_command_key(key),
            AppMode::Reading => self.handle_reading_key(key, now),
            AppMode::Quit => {}
        }
    }

    fn handle_command_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(c) => self.command_input.push(c),
            KeyCode::Backspace => {
                self.command_input.pop();
            }
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.command_input);
                let event = command_to_app_event(parse_command(&input));
                self.handle_event(event);
            }
            KeyCode::Esc => {
                self.command_input.clear();
                self.enter_reading_if_loaded();
            }
            _ => {}
        }
    }

    fn handle_reading_key(&mut self, key: KeyCode, now: Instant) {
        let font_step = self.config.display.font_step;
        match key {
            KeyCode::Char(' ') => self.scheduler.toggle(now),
            KeyCode::Char('r') => {
                self.scheduler.reset();
                self.status = None;
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
                self.scheduler.step_rate(true)
            }
            KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => {
                self.scheduler.step_rate(false)
            }
            KeyCode::Char(']') => self.scheduler.adjust_font_size(font_step),
            KeyCode::Char('[') => self.scheduler.adjust_font_size(-font_step),
            KeyCode::Char(c @ '0'..='9') => {
                let tenth = c.to_digit(10).unwrap_or(0) as f64;
                self.scheduler.seek(tenth / 10.0, now);
            }
            KeyCode::Home => self.scheduler.seek(0.0, now),
            KeyCode::End => self.scheduler.seek(1.0, now),
            KeyCode::Char('s') => self.request_transform(TransformMode::Summarize),
            KeyCode::Char('o') => self.request_transform(TransformMode::Optimize),
            KeyCode::Char('?') | KeyCode::Char('h') => {
                self.status = Some(StatusMessage::info(HELP_TEXT))
            }
            KeyCode::Char(':') | KeyCode::Esc => {
                self.scheduler.pause();
                self.mode = AppMode::Command;
            }
            KeyCode::Char('q') => self.mode = AppMode::Quit,
            _ => {}
        }
    }

    pub fn get_render_state(&self) -> RenderState {
        let state = self.scheduler.state();
        let phase = self.scheduler.phase();
        let (context_left, context_right) = if phase == PlaybackPhase::Playing {
            (Vec::new(), Vec::new())
        } else {
            context_window(
                state.tokens(),
                state.position(),
                self.config.display.context_words,
            )
        };

        RenderState {
            mode: self.mode,
            phase,
            word: self
                .scheduler
                .current_token()
                .map(|_| WordParts::from(self.scheduler.current_pivot())),
            context_left,
            context_right,
            progress: self.scheduler.progress(),
            wpm: self.scheduler.wpm(),
            font_size: self.scheduler.font_size(),
            remaining_secs: self.scheduler.time_remaining_secs(),
            status: self.status.clone(),
            command_input: self.command_input.clone(),
            generating: self.worker.is_generating(),
            source: self.source.clone(),
        }
    }
}
