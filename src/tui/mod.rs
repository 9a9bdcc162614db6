//! Full-screen terminal UI.
//!
//! Draws the three flags side by side with the question above them, plays
//! the feedback sequence on the chosen flag, and shows the "Wrong" and
//! final score notices as popups.

mod app;
mod ui;

pub use app::{map_key, KeyAction, TuiApp, TuiState};
pub use ui::draw;
