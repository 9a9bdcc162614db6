//! Command implementations for the flagquiz CLI.
//!
//! This module contains the actual implementations of CLI commands,
//! separated from the argument parsing definitions in cli/mod.rs.

pub mod completions;
pub mod config;
pub mod countries;
pub mod play;
