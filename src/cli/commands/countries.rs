//! Countries command implementation.
//!
//! This module implements the `flagquiz countries` command.

use std::path::Path;

use crate::config::QuizConfig;
use crate::flags;

use super::config::ConfigCommandResult;

/// Execute the countries command.
pub fn countries(config_path: Option<&Path>) -> ConfigCommandResult {
    let config = QuizConfig::load(config_path)?;

    println!(
        "\x1b[1mCountries\x1b[0m \x1b[2m({} in pool)\x1b[0m",
        config.game.countries.len()
    );
    for line in country_lines(&config.game.countries) {
        println!("{line}");
    }
    Ok(())
}

fn country_lines(countries: &[String]) -> Vec<String> {
    countries
        .iter()
        .map(|country| {
            if flags::has_artwork(country) {
                format!("  \x1b[32m●\x1b[0m {country}")
            } else {
                format!("  \x1b[2m○ {country} (no artwork)\x1b[0m")
            }
        })
        .collect()
}
