//! Diagnostic logging.
//!
//! The terminal belongs to the game, so logs only go to a file named on the
//! command line. Filter with `FLAGQUIZ_LOG` using `EnvFilter` syntax.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "FLAGQUIZ_LOG";

/// Filter used when `FLAGQUIZ_LOG` is unset or unparseable.
pub const DEFAULT_FILTER: &str = "info";

/// Error type for logging setup.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log file could not be opened.
    #[error("Failed to open log file: {0}")]
    Open(#[from] std::io::Error),
    /// Another subscriber is already installed.
    #[error("Failed to install logger: {0}")]
    Install(String),
}

/// Build the filter from `FLAGQUIZ_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_log(path: &Path) -> Result<File, LoggingError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Install the global subscriber.
///
/// Does nothing without a path.
pub fn init(log_file: Option<&Path>) -> Result<(), LoggingError> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = open_log(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}
