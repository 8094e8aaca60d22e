// Timing engine - WPM conversion and the per-token duration model

use crate::engine::config::TimingConfig;

fn is_sentence_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_clause_break(c: char) -> bool {
    matches!(c, ',' | ';' | ':' | '-')
}

fn is_closing_mark(c: char) -> bool {
    matches!(c, '"' | ')')
}

/// Nominal milliseconds per word at `wpm`, before per-token adjustments.
pub fn wpm_to_milliseconds(wpm: u32) -> f64 {
    60_000.0 / wpm.max(1) as f64
}

fn length_multiplier(len: usize, config: &TimingConfig) -> f64 {
    if len > config.long_word_threshold {
        let extra = (len - config.long_word_threshold) as f64 * config.long_word_step;
        1.0 + extra.min(config.long_word_max_extra)
    } else if len < config.short_word_threshold {
        config.short_word_multiplier
    } else {
        1.0
    }
}

fn numeric_multiplier(word: &str, config: &TimingConfig) -> f64 {
    if word.chars().any(|c| c.is_ascii_digit()) {
        config.numeric_multiplier
    } else {
        1.0
    }
}

/// Pause for the token's trailing mark. The first matching class wins.
fn punctuation_multiplier(word: &str, config: &TimingConfig) -> f64 {
    let last = word.chars().last();
    match last {
        Some(c) if is_sentence_terminator(c) => config.terminal_multiplier,
        _ if word.contains('\n') => config.terminal_multiplier,
        Some(c) if is_clause_break(c) => config.clause_multiplier,
        Some(c) if is_closing_mark(c) => config.closing_multiplier,
        _ => 1.0,
    }
}

/// Display time in milliseconds for `word` at `wpm`.
///
/// The length, numeric and punctuation multipliers are each derived from the
/// token alone and multiplied onto the same base; none depends on another.
pub fn calculate_word_delay(word: &str, wpm: u32, config: &TimingConfig) -> f64 {
    let base_delay = wpm_to_milliseconds(wpm);
    let len = word.chars().count();

    base_delay
        * length_multiplier(len, config)
        * numeric_multiplier(word, config)
        * punctuation_multiplier(word, config)
}

/// [`calculate_word_delay`] with the default multipliers.
pub fn compute_duration(word: &str, wpm: u32) -> f64 {
    calculate_word_delay(word, wpm, &TimingConfig::default())
}

/// Advisory seconds left for `remaining_tokens` at `wpm`.
///
/// Real per-token durations average above the nominal rate, hence the
/// correction factor.
pub fn estimate_remaining_seconds(remaining_tokens: usize, wpm: u32, correction: f64) -> u64 {
    if remaining_tokens == 0 {
        return 0;
    }
    let words_per_second = wpm.max(1) as f64 / 60.0;
    (remaining_tokens as f64 / words_per_second * correction).ceil() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_wpm_to_milliseconds_300() {
        // 300 WPM = 200ms per word (60,000 / 300 = 200)
        assert_close(wpm_to_milliseconds(300), 200.0);
    }

    #[test]
    fn test_wpm_to_milliseconds_keeps_precision() {
        // 350 WPM = 171.428... ms, no integer truncation
        assert_close(wpm_to_milliseconds(350), 60_000.0 / 350.0);
    }

    #[test]
    fn test_wpm_to_milliseconds_zero_guard() {
        assert_close(wpm_to_milliseconds(0), 60_000.0);
    }

    #[test]
    fn test_plain_word_uses_base() {
        // length 3-6 with no digits or marks: no adjustment
        assert_close(compute_duration("cat", 300), 200.0);
        assert_close(compute_duration("planet", 300), 200.0);
    }

    #[test]
    fn test_short_word_speedup() {
        assert_close(compute_duration("It", 300), 180.0);
        assert_close(compute_duration("a", 300), 180.0);
    }

    #[test]
    fn test_long_word_penalty() {
        // 9 chars: 1 + 0.3
        assert_close(compute_duration("beautiful", 300), 260.0);
    }

    #[test]
    fn test_long_word_penalty_capped_at_double() {
        assert_close(compute_duration("supercalifragilistic", 300), 400.0);
        assert_close(
            compute_duration("Antidisestablishmentarianism", 300),
            400.0,
        );
    }

    #[test]
    fn test_numeric_penalty() {
        assert!(compute_duration("123", 300) > compute_duration("abc", 300));
        assert_close(compute_duration("2024", 300), 200.0 * 1.3);
    }

    #[test]
    fn test_terminal_punctuation_pause() {
        for wpm in [50, 150, 300, 600, 1200] {
            assert!(compute_duration("Hello!", wpm) > compute_duration("Hello", wpm));
        }
        assert_close(compute_duration("world.", 300), 200.0 * 2.2);
        assert_close(compute_duration("what?", 300), 200.0 * 2.2);
    }

    #[test]
    fn test_embedded_newline_counts_as_terminal() {
        assert_close(compute_duration("end\nnext", 300), 200.0 * 1.2 * 2.2);
    }

    #[test]
    fn test_clause_punctuation_pause() {
        assert_close(compute_duration("well,", 300), 200.0 * 1.5);
        assert_close(compute_duration("note:", 300), 200.0 * 1.5);
        assert_close(compute_duration("so;", 300), 200.0 * 1.5);
        assert_close(compute_duration("self-", 300), 200.0 * 1.5);
    }

    #[test]
    fn test_closing_mark_pause() {
        assert_close(compute_duration("(aside)", 300), 200.0 * 1.1 * 1.2);
        assert_close(compute_duration("\"hey\"", 300), 200.0 * 1.2);
    }

    #[test]
    fn test_punctuation_first_match_wins() {
        // ends in '.', the '"' inside does not add a second pause
        assert_close(compute_duration("\"yes.", 300), 200.0 * 2.2);
        // ends in ')' after a comma: only the closing mark counts
        assert_close(compute_duration("(b,)", 300), 200.0 * 1.2);
    }

    #[test]
    fn test_multipliers_stack() {
        // "km2025." = 7 chars: 1.1 length, 1.3 digit, 2.2 terminal
        assert_close(compute_duration("km2025.", 300), 200.0 * 1.1 * 1.3 * 2.2);
    }

    #[test]
    fn test_inverse_relation_to_wpm() {
        assert!(compute_duration("cat", 300) < compute_duration("cat", 150));
    }

    #[test]
    fn test_duration_always_positive() {
        for word in ["", "a", "1", ".", "-", "extraordinarily!"] {
            assert!(compute_duration(word, 1200) > 0.0);
        }
    }

    #[test]
    fn test_custom_config_multipliers() {
        let config = TimingConfig {
            terminal_multiplier: 3.0,
            ..TimingConfig::default()
        };
        assert_close(calculate_word_delay("done.", 300, &config), 600.0);
    }

    #[test]
    fn test_scenario_multipliers() {
        assert_close(compute_duration("sat.", 300), 200.0 * 2.2);
        assert_close(compute_duration("5", 300), 200.0 * 0.9 * 1.3);
        assert_close(compute_duration("km!", 300), 200.0 * 2.2);
    }

    #[test]
    fn test_estimate_remaining_seconds() {
        // 100 tokens at 300 wpm = 20s nominal, 24s corrected
        assert_eq!(estimate_remaining_seconds(100, 300, 1.2), 24);
        // 7 tokens at 300 wpm = 1.4s nominal, 1.68s corrected → 2
        assert_eq!(estimate_remaining_seconds(7, 300, 1.2), 2);
        assert_eq!(estimate_remaining_seconds(0, 300, 1.2), 0);
    }
}
