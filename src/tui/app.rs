//! TUI application state and event handling.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use crate::quiz::{Phase, RandomSource, OPTIONS_PER_ROUND};
use crate::runner::{GameController, GameEvent, GameUpdate, RunResult, StopReason};

use super::ui;

/// What a key press means in the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Answer with option `0..3`.
    Answer(usize),
    /// Move the highlight one option left.
    Left,
    /// Move the highlight one option right.
    Right,
    /// Dismiss the "Wrong" notice.
    Continue,
    /// Dismiss the final score and start again.
    PlayAgain,
    /// Leave the game.
    Quit,
    /// Not bound in this phase.
    Ignore,
}

/// Map a key press to an action.
pub fn map_key(key: KeyEvent, phase: Phase, highlighted: usize) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    match (phase, key.code) {
        (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => KeyAction::Quit,
        (Phase::AwaitingAnswer, KeyCode::Char(c @ '1'..='3')) => {
            KeyAction::Answer(c as usize - '1' as usize)
        }
        (Phase::AwaitingAnswer, KeyCode::Left | KeyCode::Char('h')) => KeyAction::Left,
        (Phase::AwaitingAnswer, KeyCode::Right | KeyCode::Char('l')) => KeyAction::Right,
        (Phase::AwaitingAnswer, KeyCode::Enter | KeyCode::Char(' ')) => {
            KeyAction::Answer(highlighted)
        }
        (Phase::RoundOver, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('c')) => {
            KeyAction::Continue
        }
        (Phase::GameOver, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r')) => {
            KeyAction::PlayAgain
        }
        _ => KeyAction::Ignore,
    }
}

/// TUI view state that is not part of the game itself.
#[derive(Debug, Clone)]
pub struct TuiState {
    /// Option under the keyboard highlight.
    pub highlighted: usize,
    /// Spinner frame index.
    pub spinner_frame: usize,
    /// One-line status shown under the prompt.
    pub status: Option<String>,
    /// Start time.
    pub start_time: Instant,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            highlighted: 0,
            spinner_frame: 0,
            status: None,
            start_time: Instant::now(),
        }
    }
}

impl TuiState {
    /// Move the highlight left, wrapping.
    pub fn move_left(&mut self) {
        self.highlighted = (self.highlighted + OPTIONS_PER_ROUND - 1) % OPTIONS_PER_ROUND;
    }

    /// Move the highlight right, wrapping.
    pub fn move_right(&mut self) {
        self.highlighted = (self.highlighted + 1) % OPTIONS_PER_ROUND;
    }

    /// Fold controller updates into the status line.
    pub fn apply(&mut self, updates: &[GameUpdate]) {
        for update in updates {
            match update {
                GameUpdate::AnswerResolved(result) if result.correct => {
                    self.status = Some(format!("✓ Correct! That's {}.", result.correct_country));
                }
                GameUpdate::AnswerResolved(_) | GameUpdate::Acknowledged(_) => {
                    self.status = None;
                }
                GameUpdate::GameReset => {
                    self.status = Some("New game!".to_string());
                    self.highlighted = 0;
                }
                GameUpdate::Rejected { error, .. } => {
                    self.status = Some(format!("⚠ {error}"));
                }
                GameUpdate::FeedbackStarted { .. } => {}
            }
        }
    }

    /// Get elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}

/// TUI application.
pub struct TuiApp<R = StdRng> {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Game being played.
    controller: GameController<R>,
    /// View state.
    state: TuiState,
    /// Input poll interval.
    tick_rate: Duration,
    /// Last tick time.
    last_tick: Instant,
}

impl<R: RandomSource> TuiApp<R> {
    /// Create a new TUI application.
    pub fn new(controller: GameController<R>, tick_rate: Duration) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            controller,
            state: TuiState::default(),
            tick_rate,
            last_tick: Instant::now(),
        })
    }

    /// Run the TUI event loop until the player quits.
    pub fn run(&mut self) -> io::Result<RunResult> {
        loop {
            let now = Instant::now();
            let updates = self.controller.pump(now);
            self.state.apply(&updates);

            // Draw UI - borrow state separately
            let controller = &self.controller;
            let state = &self.state;
            self.terminal
                .draw(|f| ui::draw(f, controller, state, now))?;

            // Handle input events with timeout
            let timeout = self.tick_rate.saturating_sub(self.last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && !self.handle_key(key) {
                        break;
                    }
                }
            }

            // Tick - update spinner
            if self.last_tick.elapsed() >= self.tick_rate {
                self.state.spinner_frame = self.state.spinner_frame.wrapping_add(1);
                self.last_tick = Instant::now();
            }
        }

        let quiz = self.controller.quiz();
        Ok(RunResult {
            games_completed: self.controller.games_completed(),
            score: quiz.score(),
            rounds_played: quiz.rounds_played(),
            max_rounds: quiz.max_rounds(),
            stop_reason: StopReason::PlayerQuit,
            duration_seconds: self.state.elapsed_secs(),
        })
    }

    /// Handle a key press, returns false if should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let phase = self.controller.quiz().phase();
        let action = map_key(key, phase, self.state.highlighted);
        debug!(?action, %phase, "key");
        match action {
            KeyAction::Answer(index) => {
                self.state.highlighted = index;
                self.controller.send(GameEvent::SubmitAnswer(index));
            }
            KeyAction::Left => self.state.move_left(),
            KeyAction::Right => self.state.move_right(),
            KeyAction::Continue => self.controller.send(GameEvent::AcknowledgeRoundOver),
            KeyAction::PlayAgain => self.controller.send(GameEvent::AcknowledgeGameOver),
            KeyAction::Quit => return false,
            KeyAction::Ignore => {}
        }
        true
    }
}

impl<R> TuiApp<R> {
    /// Clean up and restore terminal.
    pub fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl<R> Drop for TuiApp<R> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{AnswerResult, Outcome};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_number_keys_answer() {
        assert_eq!(
            map_key(press(KeyCode::Char('1')), Phase::AwaitingAnswer, 2),
            KeyAction::Answer(0)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('3')), Phase::AwaitingAnswer, 0),
            KeyAction::Answer(2)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('4')), Phase::AwaitingAnswer, 0),
            KeyAction::Ignore
        );
    }

    #[test]
    fn test_enter_depends_on_phase() {
        let enter = press(KeyCode::Enter);
        assert_eq!(map_key(enter, Phase::AwaitingAnswer, 1), KeyAction::Answer(1));
        assert_eq!(map_key(enter, Phase::ShowingFeedback, 1), KeyAction::Ignore);
        assert_eq!(map_key(enter, Phase::RoundOver, 1), KeyAction::Continue);
        assert_eq!(map_key(enter, Phase::GameOver, 1), KeyAction::PlayAgain);
    }

    #[test]
    fn test_answers_ignored_outside_awaiting() {
        assert_eq!(
            map_key(press(KeyCode::Char('2')), Phase::ShowingFeedback, 0),
            KeyAction::Ignore
        );
        assert_eq!(
            map_key(press(KeyCode::Char('2')), Phase::RoundOver, 0),
            KeyAction::Ignore
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Char('q')), Phase::GameOver, 0), KeyAction::Quit);
        assert_eq!(map_key(press(KeyCode::Esc), Phase::AwaitingAnswer, 0), KeyAction::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, Phase::RoundOver, 0), KeyAction::Quit);
        assert_eq!(map_key(press(KeyCode::Char('c')), Phase::RoundOver, 0), KeyAction::Continue);
    }

    #[test]
    fn test_highlight_wraps() {
        let mut state = TuiState::default();
        state.move_left();
        assert_eq!(state.highlighted, 2);
        state.move_right();
        state.move_right();
        assert_eq!(state.highlighted, 1);
    }

    #[test]
    fn test_apply_updates_status() {
        let mut state = TuiState::default();
        let result = AnswerResult {
            selected_index: 0,
            selected_country: "France".into(),
            correct_country: "France".into(),
            correct: true,
            score: 1,
            outcome: Outcome::Continue,
        };
        state.apply(&[GameUpdate::AnswerResolved(result)]);
        assert_eq!(state.status.as_deref(), Some("✓ Correct! That's France."));

        state.highlighted = 2;
        state.apply(&[GameUpdate::GameReset]);
        assert_eq!(state.status.as_deref(), Some("New game!"));
        assert_eq!(state.highlighted, 0);
    }
}
