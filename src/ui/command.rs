//! Command parsing for the TUI command deck
//!
//! Supports:
//! - `:q` or `:quit` → Quit
//! - `:h` or `:help` → Help
//! - `@filename` → Load a text, PDF or EPUB file
//! - `@@` or a bare `@` → Load clipboard
//! - `:sum` / `:summarize`, `:opt` / `:optimize` → Transform the current text
//! - `:gen <topic>` / `:generate <topic>` → Generate new text
//! - `:wpm <n>` → Set reading rate
//! - `:read` → Back to the reader
//! - anything without a prefix → read it as-is

use crate::app::AppEvent;
use crate::transform::TransformMode;

/// Commands that can be parsed from command deck input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    LoadFile(String),
    LoadClipboard,
    Summarize,
    Optimize,
    Generate(String),
    SetWpm(u32),
    Resume,
    ReadText(String),
    Unknown(String),
}

/// Parse command deck input string into a Command
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();

    if input.is_empty() {
        return Command::Unknown(input.to_string());
    }

    if let Some(cmd) = input.strip_prefix(':') {
        let (name, arg) = match cmd.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (cmd, ""),
        };
        match (name, arg) {
            ("q" | "quit", "") => Command::Quit,
            ("h" | "help", "") => Command::Help,
            ("sum" | "summarize", "") => Command::Summarize,
            ("opt" | "optimize", "") => Command::Optimize,
            ("read", "") => Command::Resume,
            ("gen" | "generate", topic) if !topic.is_empty() => {
                Command::Generate(topic.to_string())
            }
            ("wpm", value) => match value.parse::<u32>() {
                Ok(wpm) => Command::SetWpm(wpm),
                Err(_) => Command::Unknown(input.to_string()),
            },
            _ => Command::Unknown(input.to_string()),
        }
    } else if let Some(rest) = input.strip_prefix('@') {
        let filename = rest.trim();
        if filename.is_empty() || filename == "@" {
            Command::LoadClipboard
        } else {
            Command::LoadFile(filename.to_string())
        }
    } else {
        Command::ReadText(input.to_string())
    }
}

/// Convert a parsed command into an AppEvent
pub fn command_to_app_event(command: Command) -> AppEvent {
    match command {
        Command::Quit => AppEvent::Quit,
        Command::Help => AppEvent::Help,
        Command::LoadFile(path) => AppEvent::LoadFile(path),
        Command::LoadClipboard => AppEvent::LoadClipboard,
        Command::Summarize => AppEvent::Transform(TransformMode::Summarize),
        Command::Optimize => AppEvent::Transform(TransformMode::Optimize),
        Command::Generate(topic) => AppEvent::Generate(topic),
        Command::SetWpm(wpm) => AppEvent::SetWpm(wpm),
        Command::Resume => AppEvent::Resume,
        Command::ReadText(text) => AppEvent::ReadText(text),
        Command::Unknown(input) => AppEvent::InvalidCommand(input),
    }
}
