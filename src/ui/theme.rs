use ratatui::style::Color;

use crate::engine::config::ThemeConfig;

/// UI colours, built from [`ThemeConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub anchor: Color,
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::midnight()
    }
}

impl Theme {
    /// Midnight theme
    pub fn midnight() -> Self {
        Self {
            background: Color::Rgb(26, 27, 38), // #1A1B26 Stormy Dark
            text: Color::Rgb(169, 177, 214),    // #A9B1D6 Light Blue
            anchor: Color::Rgb(247, 118, 142),  // #F7768E Coral Red
            dimmed: Color::Rgb(100, 110, 150),  // #646E96 Dimmed Blue
        }
    }

    /// Colours from config; any entry that is not `#RRGGBB` keeps its midnight value.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let fallback = Self::midnight();
        Self {
            background: parse_hex(&config.background_color).unwrap_or(fallback.background),
            text: parse_hex(&config.text_color).unwrap_or(fallback.text),
            anchor: parse_hex(&config.anchor_color).unwrap_or(fallback.anchor),
            dimmed: parse_hex(&config.dimmed_color).unwrap_or(fallback.dimmed),
        }
    }
}

fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_midnight() {
        assert_eq!(Theme::from_config(&ThemeConfig::default()), Theme::midnight());
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#FF0080"), Some(Color::Rgb(255, 0, 128)));
        assert_eq!(parse_hex(" #0a0B0c "), Some(Color::Rgb(10, 11, 12)));
        assert_eq!(parse_hex("FF0080"), None);
        assert_eq!(parse_hex("#FF00"), None);
        assert_eq!(parse_hex("#GG0000"), None);
        assert_eq!(parse_hex("#ÿÿÿ"), None);
    }

    #[test]
    fn test_invalid_entry_falls_back() {
        let config = ThemeConfig {
            anchor_color: "red".to_string(),
            text_color: "#FFFFFF".to_string(),
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&config);
        assert_eq!(theme.anchor, Theme::midnight().anchor);
        assert_eq!(theme.text, Color::Rgb(255, 255, 255));
    }
}
