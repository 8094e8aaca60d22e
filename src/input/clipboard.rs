use super::{LoadError, LoadedText};

/// Load the system clipboard's text contents via arboard.
pub fn load() -> Result<LoadedText, LoadError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| LoadError::Clipboard(e.to_string()))?;
    let text = clipboard
        .get_text()
        .map_err(|e| LoadError::Clipboard(e.to_string()))?;

    LoadedText::new(text, "clipboard")
}
