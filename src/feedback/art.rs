//! Glyphs for drawing feedback in a character grid.
//!
//! Terminals cannot rotate a cell, so a spinning flag is shown with a
//! quarter-turn glyph next to it.

/// Quarter-turn glyphs, clockwise from upright.
pub static TURN_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Glyph shown once a turn has completed (or before it starts).
pub const TURN_IDLE: &str = "●";

/// Frames for the plain-mode spinner.
pub static SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Glyph for a rotation of `degrees`.
pub fn turn_glyph(degrees: f32) -> &'static str {
    if degrees <= 0.0 || degrees >= 360.0 {
        return TURN_IDLE;
    }
    let quarter = (degrees / 90.0) as usize;
    TURN_FRAMES[quarter.min(TURN_FRAMES.len() - 1)]
}

/// Spinner frame at `index`, wrapping.
pub fn spinner_frame(index: usize) -> &'static str {
    SPINNER_FRAMES[index % SPINNER_FRAMES.len()]
}
