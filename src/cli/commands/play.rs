//! Play command implementation.
//!
//! This module implements the `flagquiz play` command.

use std::path::Path;

use tracing::info;

use crate::config::{ConfigError, QuizConfig};
use crate::runner::{run_game, RunError, RunOptions, RunResult, StopReason};

/// Result type for play command operations.
pub type PlayCommandResult = Result<RunResult, PlayCommandError>;

/// Error type for play command operations.
#[derive(Debug, thiserror::Error)]
pub enum PlayCommandError {
    /// Config could not be loaded or is not playable.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The game could not start or the terminal failed.
    #[error(transparent)]
    Run(#[from] RunError),
}

/// Execute the play command.
pub fn play(config_path: Option<&Path>, options: RunOptions) -> PlayCommandResult {
    let config = QuizConfig::load(config_path)?;
    config.validate()?;

    let mode = options.display_mode.unwrap_or(config.display.mode);
    info!(
        mode = mode.as_str(),
        rounds = options.max_rounds.unwrap_or(config.game.max_rounds),
        seeded = options.seed.or(config.game.seed).is_some(),
        "starting game"
    );

    let result = run_game(&config, options)?;
    info!(
        games = result.games_completed,
        score = result.score,
        reason = %result.stop_reason,
        "run ended"
    );

    println!();
    println!("{}", summary(&result));
    Ok(result)
}

/// One-line summary printed when a run ends.
fn summary(result: &RunResult) -> String {
    let colour = match result.stop_reason {
        StopReason::Finished => "\x1b[32m",
        StopReason::PlayerQuit | StopReason::InputClosed => "\x1b[33m",
    };
    let games = match result.games_completed {
        1 => "1 game".to_string(),
        n => format!("{n} games"),
    };
    format!(
        "{colour}{}\x1b[0m \x1b[2m({games}, last score {} after {}/{} rounds, {:.1}s)\x1b[0m",
        result.stop_reason,
        result.score,
        result.rounds_played,
        result.max_rounds,
        result.duration_seconds,
    )
}
