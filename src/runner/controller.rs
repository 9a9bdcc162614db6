//! Game controller.
//!
//! Turns presentation input into an ordered event queue and applies it to
//! the quiz, starting and completing feedback sequences as it goes.

use std::collections::VecDeque;
use std::io;
use std::time::Instant;

use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::config::{DisplayMode, QuizConfig};
use crate::feedback::{FeedbackError, FeedbackSequencer, FeedbackTiming, OptionVisual};
use crate::quiz::{seeded_rng, Outcome, QuizState, RandomSource};

use super::plain::PlainRunner;
use super::{GameError, GameEvent, GameUpdate, RunError, RunOptions, RunResult, Scoreboard};

/// Queue entry. Only the controller can mark feedback as settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Queued {
    Input(GameEvent),
    Settled,
}

/// Owns one quiz session and its feedback sequencer.
#[derive(Debug)]
pub struct GameController<R = StdRng> {
    quiz: QuizState<R>,
    feedback: FeedbackSequencer,
    queue: VecDeque<Queued>,
    games_completed: u32,
}

impl GameController<StdRng> {
    /// Build a controller from config, with `options` taking precedence.
    pub fn from_config(config: &QuizConfig, options: &RunOptions) -> Result<Self, RunError> {
        let mut settings = config.game.settings();
        if let Some(rounds) = options.max_rounds {
            settings.max_rounds = rounds;
        }
        let rng = seeded_rng(options.seed.or(config.game.seed));
        let quiz = QuizState::new(settings, rng)?;
        Ok(Self::new(quiz, config.feedback.timing()))
    }
}

impl<R: RandomSource> GameController<R> {
    /// Wrap an existing quiz.
    pub fn new(quiz: QuizState<R>, timing: FeedbackTiming) -> Self {
        Self {
            quiz,
            feedback: FeedbackSequencer::new(timing),
            queue: VecDeque::new(),
            games_completed: 0,
        }
    }

    /// Queue an input event. Nothing happens until [`pump`](Self::pump).
    pub fn send(&mut self, event: GameEvent) {
        self.queue.push_back(Queued::Input(event));
    }

    /// Process everything due at `now`, in order.
    ///
    /// A settled feedback sequence is queued behind events already waiting,
    /// so input raised during feedback is seen (and rejected) first.
    pub fn pump(&mut self, now: Instant) -> Vec<GameUpdate> {
        let mut updates = Vec::new();
        loop {
            if self.feedback.poll(now).is_some() {
                self.queue.push_back(Queued::Settled);
            }
            let Some(entry) = self.queue.pop_front() else {
                break;
            };
            updates.push(match entry {
                Queued::Input(GameEvent::FeedbackElapsed) => {
                    self.reject(GameEvent::FeedbackElapsed, GameError::NotSettled)
                }
                Queued::Input(event) => self.process(event, now),
                Queued::Settled => self.process(GameEvent::FeedbackElapsed, now),
            });
        }
        updates
    }

    fn process(&mut self, event: GameEvent, now: Instant) -> GameUpdate {
        let result = match event {
            GameEvent::SubmitAnswer(index) => self.start_feedback(index, now),
            GameEvent::FeedbackElapsed => self
                .quiz
                .resolve_answer()
                .map(|result| {
                    if result.outcome == Outcome::GameOver {
                        self.games_completed += 1;
                    }
                    GameUpdate::AnswerResolved(result)
                })
                .map_err(GameError::from),
            GameEvent::AcknowledgeRoundOver => self
                .quiz
                .acknowledge_round_over()
                .map(|outcome| {
                    if outcome == Outcome::GameOver {
                        self.games_completed += 1;
                    }
                    GameUpdate::Acknowledged(outcome)
                })
                .map_err(GameError::from),
            GameEvent::AcknowledgeGameOver => self
                .quiz
                .acknowledge_game_over()
                .map(|()| GameUpdate::GameReset)
                .map_err(GameError::from),
            GameEvent::Reset => {
                self.feedback.clear();
                self.quiz.reset_game();
                Ok(GameUpdate::GameReset)
            }
        };

        result.unwrap_or_else(|error| self.reject(event, error))
    }

    fn reject(&self, event: GameEvent, error: GameError) -> GameUpdate {
        debug!(?event, %error, "event rejected");
        GameUpdate::Rejected { event, error }
    }

    fn start_feedback(&mut self, index: usize, now: Instant) -> Result<GameUpdate, GameError> {
        // Nothing may change while a sequence is still armed.
        if let Some(playing) = self.feedback.selected() {
            return Err(FeedbackError::AlreadyPlaying(playing).into());
        }
        self.quiz.submit_answer(index)?;
        self.feedback.play(index, now)?;
        Ok(GameUpdate::FeedbackStarted { selected: index })
    }

    /// The quiz being played.
    pub fn quiz(&self) -> &QuizState<R> {
        &self.quiz
    }

    /// The feedback sequencer.
    pub fn feedback(&self) -> &FeedbackSequencer {
        &self.feedback
    }

    /// How option `index` should be drawn at `now`.
    pub fn visual(&self, index: usize, now: Instant) -> OptionVisual {
        self.feedback.visual(index, now)
    }

    /// When the pending feedback settles, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.feedback.deadline()
    }

    /// Whether events are waiting to be processed.
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Games that reached the final score.
    pub fn games_completed(&self) -> u32 {
        self.games_completed
    }
}

/// Run a game with the configured (or overridden) display mode.
pub fn run_game(config: &QuizConfig, options: RunOptions) -> Result<RunResult, RunError> {
    match options.display_mode.unwrap_or(config.display.mode) {
        DisplayMode::Tui => run_game_with_tui(config, options),
        DisplayMode::Plain => run_game_plain(config, options),
    }
}

/// Run a game on stdin/stdout, printing flags with ANSI colours.
pub fn run_game_plain(config: &QuizConfig, options: RunOptions) -> Result<RunResult, RunError> {
    let controller = GameController::from_config(config, &options)?;
    let scoreboard = Scoreboard::new();
    scoreboard.record(controller.quiz());

    // Set up Ctrl+C handler
    let board = scoreboard.clone();
    let handler_result = ctrlc::set_handler(move || {
        let (score, rounds, max) = board.snapshot();
        eprintln!(
            "\n\x1b[33mInterrupted.\x1b[0m Score {score} after {rounds}/{max} rounds."
        );
        std::process::exit(130);
    });
    if let Err(e) = handler_result {
        warn!(error = %e, "could not install Ctrl+C handler");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut runner = PlainRunner::new(controller, stdin.lock(), stdout.lock())
        .with_scoreboard(scoreboard);
    Ok(runner.run()?)
}

/// Run a game in the full-screen terminal UI.
///
/// Falls back to plain mode if the terminal cannot be initialised.
pub fn run_game_with_tui(config: &QuizConfig, options: RunOptions) -> Result<RunResult, RunError> {
    use crate::tui::TuiApp;

    let controller = GameController::from_config(config, &options)?;
    let mut tui_app = match TuiApp::new(controller, config.display.tick()) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("\x1b[33mWarning:\x1b[0m Failed to start TUI: {e}");
            eprintln!("Falling back to plain output...");
            return run_game_plain(config, options);
        }
    };

    let result = tui_app.run();
    tui_app.cleanup()?;
    Ok(result?)
}
