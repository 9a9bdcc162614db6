//! Config command implementations.
//!
//! This module implements the `flagquiz config` subcommands for managing
//! configuration without editing JSON directly.

use std::path::Path;

use crate::config::{
    metadata::{self, KeyMetadata},
    ConfigError, FieldError, QuizConfig,
};

/// Result type for config command operations.
pub type ConfigCommandResult = Result<(), ConfigCommandError>;

/// Error type for config command operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigCommandError {
    /// Bad key or value.
    #[error("{0}")]
    FieldError(#[from] FieldError),

    /// Loading, validating or saving failed.
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),

    /// No section by that name.
    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

/// Show all config values in a human-readable format.
pub fn config_show(config_path: Option<&Path>, section_filter: Option<&str>) -> ConfigCommandResult {
    let config = QuizConfig::load(config_path)?;

    println!("\x1b[1m=== flagquiz config ===\x1b[0m");
    println!();

    // Determine which sections to show
    let sections: Vec<&str> = if let Some(filter) = section_filter {
        if QuizConfig::fields_for_section(filter).is_some() {
            vec![filter]
        } else {
            return Err(ConfigCommandError::UnknownSection(filter.into()));
        }
    } else {
        QuizConfig::section_names().to_vec()
    };

    for section in sections {
        println!("\x1b[36m{section}\x1b[0m");
        if let Some(fields) = QuizConfig::fields_for_section(section) {
            for field in fields {
                let path = format!("{section}.{field}");
                let value = config.get_by_path(&path).unwrap_or_else(|_| "?".into());
                println!("  {:<16} {}", field, value);
            }
        }
        println!();
    }

    Ok(())
}

/// Get a specific config value.
pub fn config_get(config_path: Option<&Path>, key: &str) -> ConfigCommandResult {
    let config = QuizConfig::load(config_path)?;
    let value = config.get_by_path(key)?;
    println!("{value}");
    Ok(())
}

/// Set a config value. The whole config must still validate before it is saved.
pub fn config_set(config_path: Option<&Path>, key: &str, value: &str) -> ConfigCommandResult {
    let mut config = QuizConfig::load(config_path)?;
    let old_value = config.get_by_path(key).ok();

    config.set_by_path(key, value)?;
    config.validate()?;
    config.save(config_path)?;

    // Show what changed
    let new_value = config.get_by_path(key)?;
    match old_value {
        Some(old) if old != new_value => println!("\x1b[32m✓\x1b[0m {key}: {old} → {new_value}"),
        Some(_) => println!("\x1b[33m⚠\x1b[0m {key} unchanged: {new_value}"),
        None => println!("\x1b[32m✓\x1b[0m {key} = {new_value}"),
    }

    Ok(())
}

/// Reset config to defaults.
pub fn config_reset(config_path: Option<&Path>, key: Option<&str>) -> ConfigCommandResult {
    let mut config = QuizConfig::load(config_path)?;

    match key {
        Some(k) => {
            // Check if it's a section or a field
            if QuizConfig::fields_for_section(k).is_some() {
                config.reset_section(k)?;
                println!("\x1b[32m✓\x1b[0m Reset section '{k}' to defaults");
            } else if k.contains('.') {
                config.reset_field(k)?;
                let new_value = config.get_by_path(k)?;
                println!("\x1b[32m✓\x1b[0m Reset {k} to default: {new_value}");
            } else {
                return Err(ConfigCommandError::UnknownSection(k.into()));
            }
        }
        None => {
            config = QuizConfig::default();
            println!("\x1b[32m✓\x1b[0m Reset all config to defaults");
        }
    }

    config.save(config_path)?;
    Ok(())
}

/// Show documentation for config keys.
pub fn config_explain(config_path: Option<&Path>, key: Option<&str>) -> ConfigCommandResult {
    match key {
        Some(k) => explain_key(config_path, k),
        None => {
            explain_all();
            Ok(())
        }
    }
}

fn explain_key(config_path: Option<&Path>, key: &str) -> ConfigCommandResult {
    if let Some(meta) = metadata::get_metadata(key) {
        print_key_help(config_path, meta);
        return Ok(());
    }

    // Check if it's a section
    if QuizConfig::fields_for_section(key).is_some() {
        println!("\x1b[1m{key}\x1b[0m section");
        println!();
        for meta in metadata::keys_for_section(key) {
            let field = meta
                .key
                .strip_prefix(&format!("{key}."))
                .unwrap_or(meta.key);
            println!("  \x1b[36m{field}\x1b[0m");
            println!("    {}", first_sentence(meta.description));
            println!();
        }
        return Ok(());
    }

    let matches = metadata::search_keys(key);
    if matches.is_empty() {
        eprintln!("\x1b[31mUnknown key:\x1b[0m {key}");
        eprintln!("Run \x1b[36mflagquiz config explain\x1b[0m to see all available keys.");
        return Err(ConfigCommandError::FieldError(FieldError::UnknownKey(
            key.into(),
        )));
    }

    println!("\x1b[33mDid you mean:\x1b[0m");
    for meta in matches.iter().take(5) {
        println!("  {}", meta.key);
    }
    Ok(())
}

fn explain_all() {
    println!("\x1b[1m=== flagquiz config keys ===\x1b[0m");
    println!();
    println!("Use \x1b[36mflagquiz config explain <key>\x1b[0m for details.");
    println!();

    for &section in QuizConfig::section_names() {
        println!("\x1b[1m{section}\x1b[0m");
        for meta in metadata::keys_for_section(section) {
            let field = meta.key.strip_prefix(&format!("{section}.")).unwrap_or(meta.key);
            println!("  \x1b[36m{field}\x1b[0m");
            println!("    {}", first_sentence(meta.description));
        }
        println!();
    }
}

fn first_sentence(description: &str) -> &str {
    match description.find(". ") {
        Some(end) => &description[..=end],
        None => description,
    }
}

fn print_key_help(config_path: Option<&Path>, meta: &KeyMetadata) {
    let config = QuizConfig::load(config_path).ok();
    let current = config.as_ref().and_then(|c| c.get_by_path(meta.key).ok());

    println!("\x1b[1m{}\x1b[0m", meta.key);
    println!();
    println!("  {}", meta.description);
    println!();
    println!("  \x1b[2mType:\x1b[0m     {}", meta.value_type);
    println!("  \x1b[2mDefault:\x1b[0m  {}", meta.default);
    if let Some(curr) = current {
        if curr == meta.default {
            println!("  \x1b[2mCurrent:\x1b[0m  {curr} \x1b[2m(default)\x1b[0m");
        } else {
            println!("  \x1b[2mCurrent:\x1b[0m  \x1b[33m{curr}\x1b[0m");
        }
    }
    println!();
    println!("  \x1b[2mExamples:\x1b[0m");
    for example in meta.examples {
        println!("    flagquiz config set {} \"{}\"", meta.key, example);
    }
}

/// List all valid config keys.
pub fn config_keys() {
    for key in QuizConfig::all_keys() {
        println!("{key}");
    }
}
