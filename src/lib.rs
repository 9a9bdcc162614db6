//! flagquiz - Guess the flag, in your terminal.
//!
//! Each round names a country and shows three flags. Picking the right one
//! scores a point, the wrong one costs a point, and a game lasts a fixed
//! number of rounds. The quiz rules live in [`quiz`], the answer animation
//! in [`feedback`], and [`runner`] ties them to a presentation.

#![deny(missing_docs)]

/// Version string from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod feedback;
pub mod flags;
pub mod logging;
pub mod quiz;
pub mod runner;
pub mod tui;

// Re-export key types for convenience
pub use quiz::{Phase, QuizError, QuizSettings, QuizState};
pub use runner::{GameController, GameEvent, GameUpdate};
