//! CLI commands and argument handling.
//!
//! This module contains the clap CLI definitions and command implementations.

pub mod commands;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

pub use std::process::ExitCode;

use commands::completions::CompletionsCommandError;
use commands::config::ConfigCommandError;
use commands::play::PlayCommandError;

/// Guess the flag, in your terminal.
///
/// Three flags are shown; pick the one belonging to the named country.
/// A right answer scores a point, a wrong one costs a point.
#[derive(Parser, Debug)]
#[command(name = "flagquiz")]
#[command(author, version = crate::VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (default: .flagquiz/config.json).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write debug logs to this file. Filter with FLAGQUIZ_LOG.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Command to run. Prints a quick start when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands for flagquiz.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a game.
    ///
    /// Examples:
    ///   flagquiz play                # 8 rounds in the terminal UI
    ///   flagquiz play --rounds 3     # Short game
    ///   flagquiz play --plain        # Line-by-line, reads answers from stdin
    ///   flagquiz play --seed 42      # Same rounds every time
    Play(PlayCommand),

    /// List the countries flags are drawn from.
    Countries(CountriesCommand),

    /// Manage flagquiz configuration.
    ///
    /// View, set, and understand config parameters without editing JSON directly.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions.
    ///
    /// Outputs completion script to stdout for bash, zsh, or fish.
    Completions(CompletionsCommand),
}

/// Arguments for the 'play' command.
#[derive(Args, Debug)]
pub struct PlayCommand {
    /// Number of rounds (overrides game.max_rounds).
    #[arg(short = 'r', long)]
    pub rounds: Option<u32>,

    /// Seed for repeatable rounds (overrides game.seed).
    #[arg(short = 's', long)]
    pub seed: Option<u64>,

    /// Use line-oriented output instead of the terminal UI.
    #[arg(long)]
    pub plain: bool,
}

/// Arguments for the 'countries' command.
#[derive(Args, Debug)]
pub struct CountriesCommand {}

/// Subcommands for config management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show all configuration values.
    Show(ConfigShowCommand),

    /// Get a specific config value.
    ///
    /// Use dot notation for nested keys (e.g., game.max_rounds).
    Get(ConfigGetCommand),

    /// Set a config value.
    ///
    /// Use dot notation for keys. Values are validated before saving.
    Set(ConfigSetCommand),

    /// Reset config to defaults.
    ///
    /// Can reset a specific key, a section, or all config.
    Reset(ConfigResetCommand),

    /// Show documentation for config keys.
    ///
    /// Displays description, type, default value, and examples.
    Explain(ConfigExplainCommand),

    /// List all valid config keys.
    Keys(ConfigKeysCommand),
}

/// Arguments for 'config show' command.
#[derive(Args, Debug)]
pub struct ConfigShowCommand {
    /// Filter to a specific section (e.g., 'game', 'display').
    #[arg(short = 's', long)]
    pub section: Option<String>,
}

/// Arguments for 'config get' command.
#[derive(Args, Debug)]
pub struct ConfigGetCommand {
    /// Config key in dot notation (e.g., game.max_rounds).
    pub key: String,
}

/// Arguments for 'config set' command.
#[derive(Args, Debug)]
pub struct ConfigSetCommand {
    /// Config key in dot notation (e.g., game.max_rounds).
    pub key: String,

    /// Value to set.
    pub value: String,
}

/// Arguments for 'config reset' command.
#[derive(Args, Debug)]
pub struct ConfigResetCommand {
    /// Key or section to reset. If omitted, resets all config.
    pub key: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for 'config explain' command.
#[derive(Args, Debug)]
pub struct ConfigExplainCommand {
    /// Config key to explain. If omitted, lists all keys with brief descriptions.
    pub key: Option<String>,
}

/// Arguments for 'config keys' command.
#[derive(Args, Debug)]
pub struct ConfigKeysCommand {}

/// Arguments for the 'completions' command.
#[derive(Args, Debug)]
pub struct CompletionsCommand {
    /// Shell to generate completions for.
    #[arg(value_parser = ["bash", "zsh", "fish"])]
    pub shell: String,
}

/// Any command failure.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// `play` failed.
    #[error(transparent)]
    Play(#[from] PlayCommandError),
    /// A `config` subcommand or config load failed.
    #[error(transparent)]
    Config(#[from] ConfigCommandError),
    /// `completions` failed.
    #[error(transparent)]
    Completions(#[from] CompletionsCommandError),
}

/// Result of running a command.
pub type CliResult = Result<ExitCode, CliError>;

/// Print an error (if any) and turn the result into a process exit code.
pub fn handle_result(result: CliResult) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {e}");
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Command implementations
// ============================================================================

impl PlayCommand {
    /// Execute the play command.
    pub fn execute(&self, config_path: Option<&Path>) -> CliResult {
        use crate::runner::RunOptions;

        let options = RunOptions::new()
            .with_rounds(self.rounds)
            .with_seed(self.seed)
            .with_display_mode(RunOptions::display_from_flag(self.plain));
        commands::play::play(config_path, options)?;
        Ok(ExitCode::SUCCESS)
    }
}

impl CountriesCommand {
    /// Execute the countries command.
    pub fn execute(&self, config_path: Option<&Path>) -> CliResult {
        commands::countries::countries(config_path)?;
        Ok(ExitCode::SUCCESS)
    }
}

impl ConfigShowCommand {
    /// Execute the config show command.
    pub fn execute(&self, config_path: Option<&Path>) -> CliResult {
        commands::config::config_show(config_path, self.section.as_deref())?;
        Ok(ExitCode::SUCCESS)
    }
}

impl ConfigGetCommand {
    /// Execute the config get command.
    pub fn execute(&self, config_path: Option<&Path>) -> CliResult {
        commands::config::config_get(config_path, &self.key)?;
        Ok(ExitCode::SUCCESS)
    }
}

impl ConfigSetCommand {
    /// Execute the config set command.
    pub fn execute(&self, config_path: Option<&Path>) -> CliResult {
        commands::config::config_set(config_path, &self.key, &self.value)?;
        Ok(ExitCode::SUCCESS)
    }
}

impl ConfigResetCommand {
    /// Execute the config reset command.
    pub fn execute(&self, config_path: Option<&Path>) -> CliResult {
        use std::io::{self, Write};

        // Confirm unless --yes (for resetting all)
        if self.key.is_none() && !self.yes {
            print!("Reset all config to defaults? [Y/n]: ");
            let _ = io::stdout().flush();

            let mut input = String::new();
            if io::stdin().read_line(&mut input).is_ok() {
                let input = input.trim().to_lowercase();
                if input == "n" || input == "no" {
                    println!("Cancelled.");
                    return Ok(ExitCode::SUCCESS);
                }
            }
        }

        commands::config::config_reset(config_path, self.key.as_deref())?;
        Ok(ExitCode::SUCCESS)
    }
}

impl ConfigExplainCommand {
    /// Execute the config explain command.
    pub fn execute(&self, config_path: Option<&Path>) -> CliResult {
        commands::config::config_explain(config_path, self.key.as_deref())?;
        Ok(ExitCode::SUCCESS)
    }
}

impl ConfigKeysCommand {
    /// Execute the config keys command.
    pub fn execute(&self) -> CliResult {
        commands::config::config_keys();
        Ok(ExitCode::SUCCESS)
    }
}

impl CompletionsCommand {
    /// Execute the completions command - generates shell completions.
    pub fn execute(&self) -> CliResult {
        commands::completions::completions(&self.shell)?;
        Ok(ExitCode::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let result = Cli::try_parse_from(["flagquiz", "--version"]);
        // --version causes an early exit, which is expected
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_help_flag() {
        let result = Cli::try_parse_from(["flagquiz", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["flagquiz"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_play_defaults() {
        let cli = Cli::try_parse_from(["flagquiz", "play"]).unwrap();
        match cli.command {
            Some(Commands::Play(cmd)) => {
                assert!(cmd.rounds.is_none());
                assert!(cmd.seed.is_none());
                assert!(!cmd.plain);
            }
            _ => panic!("Expected Play command"),
        }
    }

    #[test]
    fn test_play_with_options() {
        let cli = Cli::try_parse_from([
            "flagquiz", "play", "--rounds", "3", "--seed", "42", "--plain",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Play(cmd)) => {
                assert_eq!(cmd.rounds, Some(3));
                assert_eq!(cmd.seed, Some(42));
                assert!(cmd.plain);
            }
            _ => panic!("Expected Play command"),
        }
    }

    #[test]
    fn test_play_rejects_negative_rounds() {
        assert!(Cli::try_parse_from(["flagquiz", "play", "--rounds", "-1"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "flagquiz",
            "config",
            "get",
            "game.max_rounds",
            "--config",
            "custom.json",
            "--log-file",
            "quiz.log",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.json")));
        assert_eq!(cli.log_file, Some(PathBuf::from("quiz.log")));
        match cli.command {
            Some(Commands::Config(ConfigCommands::Get(cmd))) => {
                assert_eq!(cmd.key, "game.max_rounds");
            }
            _ => panic!("Expected Config Get command"),
        }
    }

    #[test]
    fn test_config_reset_flags() {
        let cli = Cli::try_parse_from(["flagquiz", "config", "reset", "game", "-y"]).unwrap();
        match cli.command {
            Some(Commands::Config(ConfigCommands::Reset(cmd))) => {
                assert_eq!(cmd.key.as_deref(), Some("game"));
                assert!(cmd.yes);
            }
            _ => panic!("Expected Config Reset command"),
        }
    }

    #[test]
    fn test_completions_rejects_unknown_shell() {
        assert!(Cli::try_parse_from(["flagquiz", "completions", "powershell"]).is_err());
    }

    #[test]
    fn test_handle_result_maps_errors() {
        assert_eq!(handle_result(Ok(ExitCode::SUCCESS)), ExitCode::SUCCESS);
        let err = CliError::Completions(CompletionsCommandError::UnsupportedShell("x".into()));
        assert_eq!(handle_result(Err(err)), ExitCode::FAILURE);
    }
}
