use super::{LoadError, LoadedText};
use std::path::Path;

/// Load a plain UTF-8 text file.
///
/// Blank files are rejected so the reader never starts on nothing.
pub fn load(path: &str) -> Result<LoadedText, LoadError> {
    let path = Path::new(path);

    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    LoadedText::new(content, format!("file:{}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;

    fn temp_file(name: &str, contents: &[u8]) -> String {
        let path = std::env::temp_dir().join(format!(
            "speedread-{}-{}",
            std::process::id(),
            name
        ));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_empty_file_error() {
        let path = temp_file("empty.txt", b"   \n");
        let result = load(&path);
        assert!(matches!(result, Err(LoadError::EmptyText(_))));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_nonexistent_file_error() {
        let result = load("nonexistent_file_12345.txt");
        assert!(matches!(result, Err(LoadError::FileNotFound(_))));
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let path = temp_file("binary.txt", &[0xff, 0xfe, 0x00, 0x80]);
        let result = load(&path);
        assert!(matches!(result, Err(LoadError::Io(_))));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_valid_file_loads() {
        let path = temp_file("valid.txt", b"hello world");
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.text, "hello world");
        assert!(loaded.source.starts_with("file:"));
        fs::remove_file(path).unwrap();
    }
}
