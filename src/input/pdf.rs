use super::{LoadError, LoadedText};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load text from PDF file using pdf-extract crate.
pub fn load(path: &str) -> Result<LoadedText, LoadError> {
    let path = Path::new(path);

    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    // Read PDF file into memory
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    let text = pdf_extract::extract_text_from_mem(&buffer)
        .map_err(|e| LoadError::PdfParse(e.to_string()))?;

    LoadedText::new(text, format!("pdf:{}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_load_nonexistent_file() {
        let result = load("/nonexistent/path/document.pdf");
        assert!(matches!(result, Err(LoadError::FileNotFound(_))));
    }

    #[test]
    fn test_pdf_parse_error() {
        let err = LoadError::PdfParse("Invalid PDF structure".to_string());
        assert!(matches!(err, LoadError::PdfParse(msg) if msg.contains("Invalid")));
    }
}
