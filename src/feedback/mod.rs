//! Answer feedback.
//!
//! This module provides the timed spin/fade sequence played on the tapped
//! flag before the answer is scored, and the glyphs used to show it.

pub mod art;
mod sequencer;

pub use art::{spinner_frame, turn_glyph};
pub use sequencer::{
    FeedbackComplete, FeedbackError, FeedbackSequencer, FeedbackTiming, OptionVisual,
    DEFAULT_ANIMATION, DEFAULT_SETTLE, FADED_OPACITY, SHRUNK_SCALE,
};
