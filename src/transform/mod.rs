//! External text-transform collaborator
//!
//! The reader treats summarizing, optimizing and generating text as one
//! opaque capability: hand over text (or a topic), get replacement text back
//! or an error. Nothing here knows how the text is produced.
//!
//! ## Module Structure
//!
//! - **command.rs**: collaborator backed by a user-configured shell command
//! - **worker.rs**: runs calls off the UI thread with a single-flight guard
//!   and drops results that were superseded

pub mod command;
pub mod worker;

use std::fmt;

use crate::engine::error::TransformError;

pub use command::CommandTransformer;
pub use worker::{SubmitError, TransformCompletion, TransformWorker};

/// How existing text should be transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformMode {
    Summarize,
    Optimize,
}

impl TransformMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformMode::Summarize => "summarize",
            TransformMode::Optimize => "optimize",
        }
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work for the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformRequest {
    Transform { text: String, mode: TransformMode },
    Generate { topic: String },
}

impl TransformRequest {
    /// The text handed to the collaborator.
    pub fn input(&self) -> &str {
        match self {
            TransformRequest::Transform { text, .. } => text,
            TransformRequest::Generate { topic } => topic,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransformRequest::Transform { mode, .. } => mode.as_str(),
            TransformRequest::Generate { .. } => "generate",
        }
    }

    pub fn run(&self, transformer: &dyn TextTransformer) -> Result<String, TransformError> {
        match self {
            TransformRequest::Transform { text, mode } => transformer.transform(text, *mode),
            TransformRequest::Generate { topic } => transformer.generate(topic),
        }
    }
}

/// Black-box text transformation capability.
///
/// Callers only pass non-empty input. Implementations either return the
/// complete replacement text or fail; there is no partial result.
pub trait TextTransformer: Send + Sync {
    fn transform(&self, text: &str, mode: TransformMode) -> Result<String, TransformError>;

    fn generate(&self, topic: &str) -> Result<String, TransformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl TextTransformer for Echo {
        fn transform(&self, text: &str, mode: TransformMode) -> Result<String, TransformError> {
            Ok(format!("{}:{}", mode, text))
        }

        fn generate(&self, topic: &str) -> Result<String, TransformError> {
            Ok(format!("about {}", topic))
        }
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(TransformMode::Summarize.to_string(), "summarize");
        assert_eq!(TransformMode::Optimize.as_str(), "optimize");
    }

    #[test]
    fn test_request_dispatch() {
        let request = TransformRequest::Transform {
            text: "long text".to_string(),
            mode: TransformMode::Summarize,
        };
        assert_eq!(request.run(&Echo).unwrap(), "summarize:long text");
        assert_eq!(request.input(), "long text");
        assert_eq!(request.label(), "summarize");

        let request = TransformRequest::Generate {
            topic: "owls".to_string(),
        };
        assert_eq!(request.run(&Echo).unwrap(), "about owls");
        assert_eq!(request.label(), "generate");
    }
}
