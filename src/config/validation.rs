//! ConfigField trait implementations for config sections.
//!
//! Values are checked for type here; cross-field rules live in
//! `QuizConfig::validate`.

use super::field::{
    format_optional, format_vec, parse_number, parse_optional, parse_vec, ConfigField, FieldError,
};
use super::{DisplayConfig, DisplayMode, FeedbackConfig, GameConfig};

impl ConfigField for GameConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "max_rounds" => Some(self.max_rounds.to_string()),
            "countries" => Some(format_vec(&self.countries)),
            "seed" => Some(format_optional(&self.seed)),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "max_rounds" => {
                self.max_rounds = parse_number(key, value, "positive integer")?;
                Ok(())
            }
            "countries" => {
                self.countries = parse_vec(value);
                Ok(())
            }
            "seed" => {
                self.seed = parse_optional(key, value, "unsigned integer or none")?;
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["max_rounds", "countries", "seed"]
    }

    fn section_name() -> &'static str {
        "game"
    }
}

impl ConfigField for FeedbackConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "animation_ms" => Some(self.animation_ms.to_string()),
            "settle_ms" => Some(self.settle_ms.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "animation_ms" => {
                self.animation_ms = parse_number(key, value, "milliseconds")?;
                Ok(())
            }
            "settle_ms" => {
                self.settle_ms = parse_number(key, value, "milliseconds")?;
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["animation_ms", "settle_ms"]
    }

    fn section_name() -> &'static str {
        "feedback"
    }
}

impl ConfigField for DisplayConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "mode" => Some(self.mode.as_str().to_string()),
            "tick_ms" => Some(self.tick_ms.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "mode" => {
                self.mode = match value.to_lowercase().as_str() {
                    "tui" => DisplayMode::Tui,
                    "plain" => DisplayMode::Plain,
                    _ => {
                        return Err(FieldError::InvalidValue {
                            key: key.into(),
                            expected: "tui or plain".into(),
                        })
                    }
                };
                Ok(())
            }
            "tick_ms" => {
                self.tick_ms = parse_number(key, value, "milliseconds")?;
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["mode", "tick_ms"]
    }

    fn section_name() -> &'static str {
        "display"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_match_getters() {
        let game = GameConfig::default();
        for name in GameConfig::field_names() {
            assert!(game.get_field(name).is_some(), "game.{name}");
        }
        let feedback = FeedbackConfig::default();
        for name in FeedbackConfig::field_names() {
            assert!(feedback.get_field(name).is_some(), "feedback.{name}");
        }
        let display = DisplayConfig::default();
        for name in DisplayConfig::field_names() {
            assert!(display.get_field(name).is_some(), "display.{name}");
        }
    }

    #[test]
    fn test_section_names() {
        assert_eq!(GameConfig::section_name(), "game");
        assert_eq!(FeedbackConfig::section_name(), "feedback");
        assert_eq!(DisplayConfig::section_name(), "display");
    }

    #[test]
    fn test_display_mode_case_insensitive() {
        let mut display = DisplayConfig::default();
        display.set_field("mode", "PLAIN").unwrap();
        assert_eq!(display.mode, DisplayMode::Plain);
    }

    #[test]
    fn test_unknown_field() {
        let mut feedback = FeedbackConfig::default();
        assert!(matches!(
            feedback.set_field("fade", "1"),
            Err(FieldError::UnknownKey(_))
        ));
    }
}
