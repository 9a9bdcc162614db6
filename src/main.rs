//! flagquiz - Guess the flag, in your terminal.
//!
//! This is the main entry point for the flagquiz CLI tool.

use clap::Parser;
use flagquiz::cli::{handle_result, Cli, CliResult, Commands, ConfigCommands, ExitCode};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    if let Err(e) = flagquiz::logging::init(cli.log_file.as_deref()) {
        eprintln!("\x1b[33mWarning:\x1b[0m {e}");
    }

    let config_path = cli.config.as_deref();
    let result: CliResult = match cli.command {
        None => {
            // No subcommand provided - show help
            println!("flagquiz - Guess the flag, in your terminal.");
            println!();
            println!("Run 'flagquiz --help' for available commands.");
            println!();
            println!("Quick start:");
            println!("  flagquiz play              # 8 rounds in the terminal UI");
            println!("  flagquiz play --rounds 3   # Short game");
            println!("  flagquiz play --plain      # No full-screen UI");
            Ok(ExitCode::SUCCESS)
        }
        Some(cmd) => match cmd {
            Commands::Play(c) => c.execute(config_path),
            Commands::Countries(c) => c.execute(config_path),
            Commands::Config(subcmd) => match subcmd {
                ConfigCommands::Show(c) => c.execute(config_path),
                ConfigCommands::Get(c) => c.execute(config_path),
                ConfigCommands::Set(c) => c.execute(config_path),
                ConfigCommands::Reset(c) => c.execute(config_path),
                ConfigCommands::Explain(c) => c.execute(config_path),
                ConfigCommands::Keys(c) => c.execute(),
            },
            Commands::Completions(c) => c.execute(),
        },
    };

    handle_result(result)
}
