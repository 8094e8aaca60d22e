use std::fmt;

/// Token struct for RSVP reading
///
/// A contiguous non-whitespace run of the source text. Punctuation stays
/// attached and the surface form is never altered.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub text: String,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
