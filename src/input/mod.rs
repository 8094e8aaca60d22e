use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("PDF parse error: {0}")]
    PdfParse(String),

    #[error("EPUB parse error: {0}")]
    EpubParse(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("No readable text in {0}")]
    EmptyText(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source text ready to be handed to the reader.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedText {
    pub text: String,
    /// Where the text came from, e.g. `pdf:/path/book.pdf` or `clipboard`
    pub source: String,
}

impl LoadedText {
    pub fn new(text: String, source: impl Into<String>) -> Result<Self, LoadError> {
        let source = source.into();
        if text.trim().is_empty() {
            return Err(LoadError::EmptyText(source));
        }
        Ok(Self { text, source })
    }
}

pub mod clipboard;
pub mod epub;
pub mod pdf;
pub mod text;

/// Loads a file, picking the loader from its extension.
///
/// Anything that is not `.pdf` or `.epub` is read as UTF-8 text.
pub fn load_path(path: &str) -> Result<LoadedText, LoadError> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => pdf::load(path),
        Some("epub") => epub::load(path),
        _ => text::load(path),
    }
}
