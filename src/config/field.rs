//! ConfigField trait for dynamic get/set access to config sections.
//!
//! This module provides a trait-based abstraction for accessing config
//! fields by name, enabling the `flagquiz config` CLI commands.

use std::fmt::Display;
use std::str::FromStr;

/// Error type for config field operations.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// The specified config key is not recognised.
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// The value provided is invalid for the specified key.
    #[error("Invalid value for {key}: expected {expected}")]
    InvalidValue {
        /// The config key that was being set.
        key: String,
        /// Description of the expected value format.
        expected: String,
    },

    /// The config path format is invalid.
    #[error("Invalid path format: {0}")]
    InvalidPath(String),
}

/// Trait for config sections that support dynamic get/set access.
///
/// Each config section (GameConfig, DisplayConfig, etc.) implements this
/// trait to enable field access by name.
pub trait ConfigField {
    /// Get a field value by name, returning serialised string.
    ///
    /// Returns `None` if the key is not recognised.
    fn get_field(&self, key: &str) -> Option<String>;

    /// Set a field value by name from string input.
    ///
    /// Returns an error if the key is not recognised or the value is invalid.
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError>;

    /// List all field names in this section.
    fn field_names() -> &'static [&'static str]
    where
        Self: Sized;

    /// Get the section name for this config type.
    fn section_name() -> &'static str
    where
        Self: Sized;
}

/// Split a dot-notation path into section and field.
///
/// # Examples
///
/// ```ignore
/// split_path("game.max_rounds") // Ok(("game", "max_rounds"))
/// split_path("invalid") // Err(InvalidPath)
/// ```
pub fn split_path(path: &str) -> Result<(&str, &str), FieldError> {
    path.split_once('.')
        .ok_or_else(|| FieldError::InvalidPath(format!("{path} (expected section.field)")))
}

/// Format an optional value for display.
pub fn format_optional<T: Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "(not set)".to_string(),
    }
}

/// Format a vector of strings for display.
pub fn format_vec(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    }
}

/// Parse a number, naming `key` and `expected` on failure.
pub fn parse_number<T: FromStr>(key: &str, value: &str, expected: &str) -> Result<T, FieldError> {
    value.trim().parse().map_err(|_| FieldError::InvalidValue {
        key: key.into(),
        expected: expected.into(),
    })
}

/// Parse an optional number. Empty, "none" and "(not set)" clear it.
pub fn parse_optional<T: FromStr>(
    key: &str,
    value: &str,
    expected: &str,
) -> Result<Option<T>, FieldError> {
    match value.trim().to_lowercase().as_str() {
        "" | "none" | "(not set)" => Ok(None),
        _ => parse_number(key, value, expected).map(Some),
    }
}

/// Parse a comma-separated string into a vector.
pub fn parse_vec(value: &str) -> Vec<String> {
    if value.is_empty() || value == "(none)" {
        Vec::new()
    } else {
        value
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
