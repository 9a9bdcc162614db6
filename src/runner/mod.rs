//! Game runner.
//!
//! This module wires the quiz rules and the feedback sequencer into an
//! event-driven controller, and drives it from either the TUI or a
//! line-oriented terminal loop.

use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};
use std::sync::Arc;

mod controller;
mod plain;

pub use controller::{run_game, run_game_plain, run_game_with_tui, GameController};
pub use plain::{render_flag_ansi, PlainRunner};

use crate::config::DisplayMode;
use crate::feedback::FeedbackError;
use crate::quiz::{AnswerResult, Outcome, QuizError, QuizState, RandomSource};

/// Inputs a presentation layer can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The player picked option `0..3`.
    SubmitAnswer(usize),
    /// The feedback sequence settled. Raised by the controller itself;
    /// sending it from outside is rejected.
    FeedbackElapsed,
    /// The player dismissed the "Wrong" notice.
    AcknowledgeRoundOver,
    /// The player dismissed the final score.
    AcknowledgeGameOver,
    /// Abandon the current game and start over.
    Reset,
}

/// What processing one event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameUpdate {
    /// Feedback started for the picked option.
    FeedbackStarted {
        /// Option being animated.
        selected: usize,
    },
    /// The pending answer was scored.
    AnswerResolved(AnswerResult),
    /// The "Wrong" notice was dismissed.
    Acknowledged(Outcome),
    /// A new game started.
    GameReset,
    /// The event was not legal; nothing changed.
    Rejected {
        /// The offending event.
        event: GameEvent,
        /// Why it was refused.
        error: GameError,
    },
}

/// Errors surfaced by the controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Rejected by the quiz rules.
    #[error(transparent)]
    Quiz(#[from] QuizError),
    /// Rejected by the feedback sequencer.
    #[error(transparent)]
    Feedback(#[from] FeedbackError),
    /// Feedback completion can only come from the sequencer.
    #[error("Feedback has not settled")]
    NotSettled,
}

/// Errors that stop a run before or during play.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The game could not be set up.
    #[error(transparent)]
    Quiz(#[from] QuizError),
    /// Terminal input or output failed.
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for running a game.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Rounds per game (None uses config default).
    pub max_rounds: Option<u32>,
    /// RNG seed (None uses config, then entropy).
    pub seed: Option<u64>,
    /// Presentation to use (None uses config default).
    pub display_mode: Option<DisplayMode>,
}

impl RunOptions {
    /// Create options that defer everything to config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rounds per game.
    pub fn with_rounds(mut self, rounds: Option<u32>) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Set RNG seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set display mode.
    pub fn with_display_mode(mut self, mode: Option<DisplayMode>) -> Self {
        self.display_mode = mode;
        self
    }

    /// Map the `--plain` flag onto a display mode override.
    pub fn display_from_flag(plain: bool) -> Option<DisplayMode> {
        plain.then_some(DisplayMode::Plain)
    }
}

/// Reasons a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The player quit.
    PlayerQuit,
    /// The player declined another game.
    Finished,
    /// Input ran out.
    InputClosed,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::PlayerQuit => write!(f, "Player quit"),
            StopReason::Finished => write!(f, "Game finished"),
            StopReason::InputClosed => write!(f, "Input closed"),
        }
    }
}

/// Result of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Games played through to the final score.
    pub games_completed: u32,
    /// Score of the game in progress (or just finished).
    pub score: i32,
    /// Rounds played in that game.
    pub rounds_played: u32,
    /// Rounds per game.
    pub max_rounds: u32,
    /// Why the run ended.
    pub stop_reason: StopReason,
    /// Wall-clock duration in seconds.
    pub duration_seconds: f64,
}

/// Score snapshot shared with the Ctrl+C handler.
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    score: Arc<AtomicI32>,
    rounds_played: Arc<AtomicU32>,
    max_rounds: Arc<AtomicU32>,
}

impl Scoreboard {
    /// Create an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the current figures out of `quiz`.
    pub fn record<R: RandomSource>(&self, quiz: &QuizState<R>) {
        self.score.store(quiz.score(), Ordering::SeqCst);
        self.rounds_played
            .store(quiz.rounds_played(), Ordering::SeqCst);
        self.max_rounds.store(quiz.max_rounds(), Ordering::SeqCst);
    }

    /// `(score, rounds_played, max_rounds)` as last recorded.
    pub fn snapshot(&self) -> (i32, u32, u32) {
        (
            self.score.load(Ordering::SeqCst),
            self.rounds_played.load(Ordering::SeqCst),
            self.max_rounds.load(Ordering::SeqCst),
        )
    }
}
