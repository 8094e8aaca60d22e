// Configuration for the speedread engine and UI components.
// Defaults are compiled in; `Config::from_env` overlays environment overrides.

use std::env;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::engine::error::ConfigError;

/// Timing configuration for playback and the duration model
#[derive(Debug, Clone, PartialEq)]
pub struct TimingConfig {
    /// Words per minute reading speed (default 300)
    pub wpm: u32,

    /// Floor applied on every rate change (default 50)
    pub min_wpm: u32,

    /// Ceiling for keyboard rate steps only; the engine has no ceiling
    pub max_ui_wpm: u32,

    /// Rate change per keypress (default 25)
    pub wpm_step: u32,

    /// Words longer than this are slowed down (default 6 chars)
    pub long_word_threshold: usize,

    /// Extra multiplier per char over the threshold (default 0.1)
    pub long_word_step: f64,

    /// Cap on the extra long-word multiplier (default 1.0, i.e. at most 2x)
    pub long_word_max_extra: f64,

    /// Words shorter than this are sped up (default 3 chars)
    pub short_word_threshold: usize,

    /// Multiplier for short words (default 0.9x)
    pub short_word_multiplier: f64,

    /// Multiplier for tokens containing a digit (default 1.3x)
    pub numeric_multiplier: f64,

    pub terminal_multiplier: f64, // . ! ? or embedded newline, default 2.2x
    pub clause_multiplier: f64,   // , ; : -, default 1.5x
    pub closing_multiplier: f64,  // " ), default 1.2x

    /// Correction applied to the nominal time-remaining estimate (default 1.2)
    pub remaining_correction: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            wpm: 300,
            min_wpm: 50,
            max_ui_wpm: 1200,
            wpm_step: 25,
            long_word_threshold: 6,
            long_word_step: 0.1,
            long_word_max_extra: 1.0,
            short_word_threshold: 3,
            short_word_multiplier: 0.9,
            numeric_multiplier: 1.3,
            terminal_multiplier: 2.2,
            clause_multiplier: 1.5,
            closing_multiplier: 1.2,
            remaining_correction: 1.2,
        }
    }
}

/// Word display configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Initial font size (default 3.0)
    pub font_size: f32,
    pub font_size_range: RangeInclusive<f32>,
    /// Size change per keypress (default 0.5)
    pub font_step: f32,
    /// Words shown either side of the current word while paused
    pub context_words: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            font_size: 3.0,
            font_size_range: 1.0..=8.0,
            font_step: 0.5,
            context_words: 3,
        }
    }
}

/// External text-transform collaborator settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformConfig {
    /// Shell command that reads text on stdin and writes the result to stdout
    pub command: Option<String>,
    /// Passed through to the command untouched
    pub language: Option<String>,
}

/// Midnight theme colours
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeConfig {
    /// Background color (#1A1B26 - Stormy Dark)
    pub background_color: String,

    /// Text color (#A9B1D6 - Light Blue)
    pub text_color: String,

    /// Pivot color (#F7768E - Coral Red)
    pub anchor_color: String,

    /// Context and chrome color (#646E96 - Dimmed Blue)
    pub dimmed_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background_color: "#1A1B26".to_string(),
            text_color: "#A9B1D6".to_string(),
            anchor_color: "#F7768E".to_string(),
            dimmed_color: "#646E96".to_string(),
        }
    }
}

/// Master configuration combining all speedread settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub timing: TimingConfig,
    pub display: DisplayConfig,
    pub transform: TransformConfig,
    pub theme: ThemeConfig,
    /// Where tracing output goes; `None` means the temp-dir default
    pub log_path: Option<PathBuf>,
}

pub const ENV_WPM: &str = "SPEEDREAD_WPM";
pub const ENV_FONT_SIZE: &str = "SPEEDREAD_FONT_SIZE";
pub const ENV_TRANSFORM_CMD: &str = "SPEEDREAD_TRANSFORM_CMD";
pub const ENV_LANGUAGE: &str = "SPEEDREAD_LANGUAGE";
pub const ENV_LOG: &str = "SPEEDREAD_LOG";

impl Config {
    /// Defaults overlaid with `SPEEDREAD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = non_blank(ENV_WPM) {
            let wpm: u32 = parse_value(ENV_WPM, &raw)?;
            config.timing.wpm = wpm.max(config.timing.min_wpm);
        }

        if let Some(raw) = non_blank(ENV_FONT_SIZE) {
            let size: f32 = parse_value(ENV_FONT_SIZE, &raw)?;
            if !size.is_finite() {
                return Err(ConfigError::InvalidValue {
                    key: ENV_FONT_SIZE,
                    value: raw,
                });
            }
            let range = &config.display.font_size_range;
            config.display.font_size = size.clamp(*range.start(), *range.end());
        }

        config.transform.command = non_blank(ENV_TRANSFORM_CMD);
        config.transform.language = non_blank(ENV_LANGUAGE);
        config.log_path = non_blank(ENV_LOG).map(PathBuf::from);

        Ok(config)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_path
            .clone()
            .unwrap_or_else(|| env::temp_dir().join("speedread.log"))
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}
