use crate::reading::Token;

/// Splits text into display tokens on runs of whitespace.
///
/// Spaces, tabs and newlines are all plain separators. Punctuation stays on
/// the word it touches; empty and whitespace-only input yield no tokens.
pub fn tokenize_text(text: &str) -> Vec<Token> {
    text.split_whitespace().map(Token::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::as_str).collect()
    }

    #[test]
    fn test_tokenize_single_word() {
        let tokens = tokenize_text("hello");
        assert_eq!(texts(&tokens), vec!["hello"]);
    }

    #[test]
    fn test_tokenize_multiple_words() {
        let tokens = tokenize_text("hello world");
        assert_eq!(texts(&tokens), vec!["hello", "world"]);
    }

    #[test]
    fn test_tokenize_keeps_punctuation_attached() {
        let tokens = tokenize_text("hello world.");
        assert_eq!(texts(&tokens), vec!["hello", "world."]);
    }

    #[test]
    fn test_tokenize_preserves_case_and_symbols() {
        let tokens = tokenize_text("\"Quoted,\" (aside) WOW?!");
        assert_eq!(texts(&tokens), vec!["\"Quoted,\"", "(aside)", "WOW?!"]);
    }

    #[test]
    fn test_tokenize_mixed_whitespace() {
        let tokens = tokenize_text("  one\ttwo\n\nthree   four \r\n");
        assert_eq!(texts(&tokens), vec!["one", "two", "three", "four"]);
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize_text("").is_empty());
    }

    #[test]
    fn test_tokenize_whitespace_only() {
        assert!(tokenize_text("   ").is_empty());
        assert!(tokenize_text("\n\t \n").is_empty());
    }

    #[test]
    fn test_tokenize_never_produces_empty_tokens() {
        let tokens = tokenize_text(" a  b\t\tc \n d ");
        assert!(tokens.iter().all(|t| !t.text.is_empty()));
    }

    #[test]
    fn test_tokenize_join_reconstructs_runs() {
        let inputs = [
            "The cat sat. It ran 5 km!",
            "  leading and trailing  ",
            "tabs\tand\nnewlines\r\nmixed",
            "ünïcödé wörds 日本語 テキスト",
        ];
        for input in inputs {
            let joined = texts(&tokenize_text(input)).join(" ");
            let expected = input.split_whitespace().collect::<Vec<_>>().join(" ");
            assert_eq!(joined, expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_tokenize_scenario_sentence() {
        let tokens = tokenize_text("The cat sat. It ran 5 km!");
        assert_eq!(
            texts(&tokens),
            vec!["The", "cat", "sat.", "It", "ran", "5", "km!"]
        );
    }
}
