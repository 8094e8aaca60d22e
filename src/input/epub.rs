use super::{LoadError, LoadedText};
use std::path::Path;

/// Load text from EPUB file using epub crate.
///
/// Chapters are concatenated in spine order, separated by blank lines.
pub fn load(path: &str) -> Result<LoadedText, LoadError> {
    let path = Path::new(path);

    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let mut doc = epub::doc::EpubDoc::new(path).map_err(|e| LoadError::EpubParse(e.to_string()))?;

    let num_chapters = doc.get_num_chapters();

    if num_chapters == 0 {
        return Err(LoadError::EpubParse(
            "No chapters found in EPUB".to_string(),
        ));
    }

    let mut content = String::new();

    for chapter_idx in 0..num_chapters {
        if !doc.set_current_chapter(chapter_idx) {
            continue;
        }

        if let Some((chapter_content, _mime)) = doc.get_current_str() {
            let plain_text = extract_plain_text(&chapter_content);
            if plain_text.is_empty() {
                continue;
            }
            if !content.is_empty() {
                content.push_str("\n\n");
            }
            content.push_str(&plain_text);
        }
    }

    LoadedText::new(content, format!("epub:{}", path.display()))
}

/// Extract plain text from chapter HTML.
///
/// Tags are dropped, the contents of `<head>`, `<style>` and `<script>` are
/// skipped, and the handful of entities common in ebooks are decoded.
fn extract_plain_text(html: &str) -> String {
    let mut result = String::new();
    let mut rest = html;
    let mut skip_until: Option<&str> = None;

    while let Some(open) = rest.find('<') {
        if skip_until.is_none() {
            result.push_str(&rest[..open]);
        }
        let Some(close) = rest[open..].find('>') else {
            rest = "";
            break;
        };
        let tag = rest[open + 1..open + close].trim().to_ascii_lowercase();
        let name = tag
            .split(|c: char| c.is_whitespace() || c == '/')
            .find(|part| !part.is_empty())
            .unwrap_or("");

        match skip_until {
            Some(end) if tag.starts_with('/') && name == end => skip_until = None,
            Some(_) => {}
            None => match name {
                "head" | "style" | "script" if !tag.starts_with('/') && !tag.ends_with('/') => {
                    skip_until = Some(match name {
                        "head" => "head",
                        "style" => "style",
                        _ => "script",
                    });
                }
                // Block-level boundaries become line breaks
                "p" | "br" | "div" | "li" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                    result.push('\n')
                }
                _ => {}
            },
        }
        rest = &rest[open + close + 1..];
    }
    if skip_until.is_none() {
        result.push_str(rest);
    }

    decode_entities(&result)
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epub_load_nonexistent_file() {
        let result = load("/nonexistent/path/book.epub");
        assert!(matches!(result, Err(LoadError::FileNotFound(_))));
    }

    #[test]
    fn test_epub_parse_error() {
        let err = LoadError::EpubParse("Invalid EPUB structure".to_string());
        assert!(matches!(err, LoadError::EpubParse(msg) if msg.contains("Invalid")));
    }

    #[test]
    fn test_extract_plain_text() {
        let html = "<html><body><p>Hello World</p></body></html>";
        let result = extract_plain_text(html);
        assert_eq!(result, "Hello World");
    }

    #[test]
    fn test_extract_plain_text_skips_head_and_style() {
        let html = "<html><head><title>Ch 1</title><style>p { color: red; }</style></head>\
                    <body><p>Body text.</p><script>var x = 1;</script></body></html>";
        assert_eq!(extract_plain_text(html), "Body text.");
    }

    #[test]
    fn test_extract_plain_text_paragraph_breaks() {
        let html = "<p>First.</p><p>Second.</p>line<br/>break";
        assert_eq!(extract_plain_text(html), "First.\nSecond.\nline\nbreak");
    }

    #[test]
    fn test_extract_plain_text_decodes_entities() {
        let html = "<p>Fish &amp; chips &lt;3 &quot;yum&quot;</p>";
        assert_eq!(extract_plain_text(html), "Fish & chips <3 \"yum\"");
    }
}
