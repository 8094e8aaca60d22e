use crate::app::mode::AppMode;
use crate::reading::{PivotSplit, PlaybackPhase};

/// Owned left/pivot/right parts of the word on screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WordParts {
    pub left: String,
    pub pivot: String,
    pub right: String,
}

impl From<PivotSplit<'_>> for WordParts {
    fn from(split: PivotSplit<'_>) -> Self {
        Self {
            left: split.left.to_string(),
            pivot: split.pivot.to_string(),
            right: split.right.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Render state for UI components
///
/// A snapshot taken once per frame; the pivot split is derived from the
/// current token here rather than kept in the playback state.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub mode: AppMode,
    pub phase: PlaybackPhase,
    pub word: Option<WordParts>,
    pub context_left: Vec<String>,
    pub context_right: Vec<String>,
    pub progress: (usize, usize),
    pub wpm: u32,
    pub font_size: f32,
    pub remaining_secs: u64,
    pub status: Option<StatusMessage>,
    pub command_input: String,
    pub generating: bool,
    pub source: Option<String>,
}

/// Words either side of `current`, at most `window` each way.
pub fn context_window(
    tokens: &[crate::reading::Token],
    current: usize,
    window: usize,
) -> (Vec<String>, Vec<String>) {
    let current = current.min(tokens.len());
    let start = current.saturating_sub(window);
    let left = tokens[start..current]
        .iter()
        .map(|t| t.text.clone())
        .collect();

    let right = if current < tokens.len() {
        let end = std::cmp::min(current + window + 1, tokens.len());
        tokens[current + 1..end]
            .iter()
            .map(|t| t.text.clone())
            .collect()
    } else {
        Vec::new()
    };

    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::{resolve_pivot, tokenize_text};

    #[test]
    fn test_word_parts_from_split() {
        let parts = WordParts::from(resolve_pivot("reading"));
        assert_eq!(parts.left, "re");
        assert_eq!(parts.pivot, "a");
        assert_eq!(parts.right, "ding");
    }

    #[test]
    fn test_context_window_middle() {
        let tokens = tokenize_text("one two three four five six seven");
        let (left, right) = context_window(&tokens, 3, 2);
        assert_eq!(left, vec!["two", "three"]);
        assert_eq!(right, vec!["five", "six"]);
    }

    #[test]
    fn test_context_window_edges() {
        let tokens = tokenize_text("one two three");
        let (left, right) = context_window(&tokens, 0, 3);
        assert!(left.is_empty());
        assert_eq!(right, vec!["two", "three"]);

        let (left, right) = context_window(&tokens, 3, 3);
        assert_eq!(left, vec!["one", "two", "three"]);
        assert!(right.is_empty());
    }

    #[test]
    fn test_context_window_empty() {
        let (left, right) = context_window(&[], 0, 3);
        assert!(left.is_empty() && right.is_empty());
    }

    #[test]
    fn test_status_constructors() {
        assert_eq!(StatusMessage::info("ok").kind, StatusKind::Info);
        assert_eq!(StatusMessage::error("bad").kind, StatusKind::Error);
    }
}
