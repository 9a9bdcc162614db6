//! Configuration models for .flagquiz/config.json.
//!
//! Every field has a serde default, so a partial file (or no file at all)
//! still yields a complete configuration.

pub mod field;
pub mod metadata;
mod validation;

use serde::{Deserialize, Serialize};

pub use field::{ConfigField, FieldError};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::feedback::FeedbackTiming;
use crate::quiz::{QuizError, QuizSettings, DEFAULT_COUNTRIES, DEFAULT_MAX_ROUNDS};

/// Default config directory path.
pub const CONFIG_DIR: &str = ".flagquiz";
/// Default config file path.
pub const CONFIG_FILE: &str = ".flagquiz/config.json";

/// Game rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Rounds per game.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
    /// Candidate pool the options are drawn from.
    #[serde(default = "default_countries")]
    pub countries: Vec<String>,
    /// Fixed RNG seed for repeatable games.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_max_rounds() -> u32 {
    DEFAULT_MAX_ROUNDS
}

fn default_countries() -> Vec<String> {
    DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect()
}

impl GameConfig {
    /// Rules for a game built from this section.
    pub fn settings(&self) -> QuizSettings {
        QuizSettings {
            max_rounds: self.max_rounds,
            countries: self.countries.clone(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
            countries: default_countries(),
            seed: None,
        }
    }
}

/// Answer feedback timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Length of the spin/fade animation in milliseconds.
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
    /// Delay from answering until the answer is scored, in milliseconds.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

fn default_animation_ms() -> u64 {
    500
}

fn default_settle_ms() -> u64 {
    700
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            animation_ms: default_animation_ms(),
            settle_ms: default_settle_ms(),
        }
    }
}

impl FeedbackConfig {
    /// Timing for the feedback sequencer.
    pub fn timing(&self) -> FeedbackTiming {
        FeedbackTiming::from_millis(self.animation_ms, self.settle_ms)
    }
}

/// How the game is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Full-screen terminal UI (default).
    #[default]
    Tui,
    /// Line-oriented output with ANSI colours.
    Plain,
}

impl DisplayMode {
    /// Lowercase name as used in the config file.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Tui => "tui",
            DisplayMode::Plain => "plain",
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Presentation to use.
    #[serde(default)]
    pub mode: DisplayMode,
    /// TUI input poll interval in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_tick_ms() -> u64 {
    50
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::default(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl DisplayConfig {
    /// TUI tick interval.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

/// Main configuration for flagquiz.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Game rules.
    #[serde(default)]
    pub game: GameConfig,
    /// Feedback timing.
    #[serde(default)]
    pub feedback: FeedbackConfig,
    /// Presentation.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Error type for config operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading the config file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Error parsing the config file JSON.
    #[error("Failed to parse config JSON: {0}")]
    ParseError(#[from] serde_json::Error),
    /// Values that cannot produce a playable game.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl QuizConfig {
    /// Load configuration from a file, or return defaults if file doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to config file. Defaults to `.flagquiz/config.json` if None.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config: QuizConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories as needed.
    pub fn save(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the path for the config file.
    pub fn config_file() -> PathBuf {
        PathBuf::from(CONFIG_FILE)
    }

    /// Check the values describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.max_rounds == 0 {
            return Err(ConfigError::Invalid(
                "game.max_rounds must be at least 1".into(),
            ));
        }

        // Same rule the game applies when it starts.
        if let Err(e) = self.game.settings().validate() {
            let reason = match e {
                QuizError::InvalidSettings(reason) => reason,
                other => other.to_string(),
            };
            return Err(ConfigError::Invalid(format!("game.countries: {reason}")));
        }

        if self.feedback.settle_ms < self.feedback.animation_ms {
            return Err(ConfigError::Invalid(
                "feedback.settle_ms must not be shorter than feedback.animation_ms".into(),
            ));
        }

        if self.display.tick_ms == 0 {
            return Err(ConfigError::Invalid(
                "display.tick_ms must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Get a config value by dot-notation path (e.g., "game.max_rounds").
    pub fn get_by_path(&self, path: &str) -> Result<String, FieldError> {
        let (section, key) = field::split_path(path)?;
        let value = match section {
            "game" => self.game.get_field(key),
            "feedback" => self.feedback.get_field(key),
            "display" => self.display.get_field(key),
            _ => None,
        };
        value.ok_or_else(|| FieldError::UnknownKey(path.into()))
    }

    /// Set a config value by dot-notation path.
    pub fn set_by_path(&mut self, path: &str, value: &str) -> Result<(), FieldError> {
        let (section, key) = field::split_path(path)?;
        match section {
            "game" => self.game.set_field(key, value),
            "feedback" => self.feedback.set_field(key, value),
            "display" => self.display.set_field(key, value),
            _ => Err(FieldError::UnknownKey(path.into())),
        }
    }

    /// List all section names.
    pub fn section_names() -> &'static [&'static str] {
        &["game", "feedback", "display"]
    }

    /// Get all field names for a section.
    pub fn fields_for_section(section: &str) -> Option<&'static [&'static str]> {
        match section {
            "game" => Some(GameConfig::field_names()),
            "feedback" => Some(FeedbackConfig::field_names()),
            "display" => Some(DisplayConfig::field_names()),
            _ => None,
        }
    }

    /// List all valid config keys as dot-notation paths.
    pub fn all_keys() -> Vec<String> {
        Self::section_names()
            .iter()
            .filter_map(|section| {
                Self::fields_for_section(section)
                    .map(|fields| fields.iter().map(move |f| format!("{section}.{f}")))
            })
            .flatten()
            .collect()
    }

    /// Reset a section to its default values.
    pub fn reset_section(&mut self, section: &str) -> Result<(), FieldError> {
        match section {
            "game" => self.game = GameConfig::default(),
            "feedback" => self.feedback = FeedbackConfig::default(),
            "display" => self.display = DisplayConfig::default(),
            _ => return Err(FieldError::UnknownKey(section.into())),
        }
        Ok(())
    }

    /// Reset a specific field to its default value.
    pub fn reset_field(&mut self, path: &str) -> Result<(), FieldError> {
        // Validates the path before touching anything.
        self.get_by_path(path)?;
        let (section, key) = field::split_path(path)?;
        let default = Self::default();
        match (section, key) {
            ("game", "seed") => self.game.seed = default.game.seed,
            ("game", "countries") => self.game.countries = default.game.countries,
            _ => {
                let value = default.get_by_path(path)?;
                self.set_by_path(path, &value)?;
            }
        }
        Ok(())
    }
}
