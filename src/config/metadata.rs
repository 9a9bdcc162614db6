//! Config key metadata for documentation and help.
//!
//! Descriptions, types, defaults and examples for every config key, used by
//! `flagquiz config explain`.

/// Metadata for a single config key.
#[derive(Debug, Clone)]
pub struct KeyMetadata {
    /// The full dot-notation key (e.g., "game.max_rounds").
    pub key: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Type description (e.g., "positive integer", "tui | plain").
    pub value_type: &'static str,
    /// Default value as string.
    pub default: &'static str,
    /// Example values.
    pub examples: &'static [&'static str],
}

/// All config key metadata.
pub static METADATA: &[KeyMetadata] = &[
    // game section
    KeyMetadata {
        key: "game.max_rounds",
        description: "Number of rounds in a game. After the last answer the final score \
                      is shown as score/max_rounds.",
        value_type: "positive integer",
        default: "8",
        examples: &["3", "8", "20"],
    },
    KeyMetadata {
        key: "game.countries",
        description: "Candidate pool the three options of each round are drawn from. \
                      Needs at least three distinct names. Countries without artwork \
                      are drawn as a grey placeholder.",
        value_type: "comma-separated strings",
        default: "Pakistan, Estonia, France, Germany, Ireland, Italy, Nigeria, Poland, \
                  Russia, Spain, UK, US",
        examples: &["France, Italy, Ireland", "Germany, Russia, Estonia, Poland"],
    },
    KeyMetadata {
        key: "game.seed",
        description: "Fixed seed for the random number generator. The same seed deals \
                      the same rounds. Unset draws a fresh seed each run.",
        value_type: "unsigned integer (optional)",
        default: "(not set)",
        examples: &["42", "none"],
    },
    // feedback section
    KeyMetadata {
        key: "feedback.animation_ms",
        description: "Length of the spin and fade played on the chosen flag.",
        value_type: "milliseconds",
        default: "500",
        examples: &["0", "300", "500"],
    },
    KeyMetadata {
        key: "feedback.settle_ms",
        description: "Delay from answering until the answer is scored. Must not be \
                      shorter than feedback.animation_ms.",
        value_type: "milliseconds",
        default: "700",
        examples: &["0", "700", "1200"],
    },
    // display section
    KeyMetadata {
        key: "display.mode",
        description: "How the game is shown. 'tui' is a full-screen terminal UI; \
                      'plain' prints coloured flags line by line and reads answers \
                      from stdin.",
        value_type: "tui | plain",
        default: "tui",
        examples: &["tui", "plain"],
    },
    KeyMetadata {
        key: "display.tick_ms",
        description: "How often the terminal UI polls for input and redraws.",
        value_type: "milliseconds",
        default: "50",
        examples: &["16", "50", "100"],
    },
];

/// Get metadata for a specific key.
pub fn get_metadata(key: &str) -> Option<&'static KeyMetadata> {
    METADATA.iter().find(|m| m.key == key)
}

/// Get all keys in the metadata table.
pub fn all_keys() -> impl Iterator<Item = &'static str> {
    METADATA.iter().map(|m| m.key)
}

/// Search for keys matching a query (key or description).
pub fn search_keys(query: &str) -> Vec<&'static KeyMetadata> {
    let query_lower = query.to_lowercase();
    METADATA
        .iter()
        .filter(|m| {
            m.key.to_lowercase().contains(&query_lower)
                || m.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}

/// Get all keys for a specific section.
pub fn keys_for_section(section: &str) -> Vec<&'static KeyMetadata> {
    let prefix = format!("{section}.");
    METADATA
        .iter()
        .filter(|m| m.key.starts_with(&prefix))
        .collect()
}
