//! Line-oriented game loop.
//!
//! Prints flags as ANSI true-colour blocks and reads answers a line at a
//! time, so a game can be played through a pipe.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;

use crate::feedback::{spinner_frame, turn_glyph};
use crate::flags::flag_grid;
use crate::quiz::{Phase, RandomSource, FINAL_SCORE_TITLE, OPTIONS_PER_ROUND, WRONG_TITLE};

use super::{GameController, GameEvent, GameUpdate, RunResult, Scoreboard, StopReason};

/// Width of a printed flag in cells.
pub const FLAG_WIDTH: usize = 18;
/// Height of a printed flag in cells.
pub const FLAG_HEIGHT: usize = 6;

const FRAME_INTERVAL: Duration = Duration::from_millis(80);
const GAP: &str = "   ";

/// Render `country`'s flag as ANSI background-coloured rows.
pub fn render_flag_ansi(country: &str, width: usize, height: usize) -> String {
    flag_rows(country, width, height).join("\n")
}

fn flag_rows(country: &str, width: usize, height: usize) -> Vec<String> {
    flag_grid(country, width, height)
        .into_iter()
        .map(|row| {
            let mut line = String::new();
            for cell in row {
                line.push_str(&format!("\x1b[48;2;{};{};{}m ", cell.r, cell.g, cell.b));
            }
            line.push_str("\x1b[0m");
            line
        })
        .collect()
}

enum Reply {
    Pick(usize),
    Quit,
    Closed,
}

/// Drives a [`GameController`] from a reader and a writer.
pub struct PlainRunner<I, W, R = StdRng> {
    controller: GameController<R>,
    input: I,
    output: W,
    scoreboard: Option<Scoreboard>,
}

impl<I: BufRead, W: Write, R: RandomSource> PlainRunner<I, W, R> {
    /// Create a runner reading answers from `input` and printing to `output`.
    pub fn new(controller: GameController<R>, input: I, output: W) -> Self {
        Self {
            controller,
            input,
            output,
            scoreboard: None,
        }
    }

    /// Keep `scoreboard` updated as the game progresses.
    pub fn with_scoreboard(mut self, scoreboard: Scoreboard) -> Self {
        self.scoreboard = Some(scoreboard);
        self
    }

    /// The controller being driven.
    pub fn controller(&self) -> &GameController<R> {
        &self.controller
    }

    /// Play until the player quits, declines another game, or input ends.
    pub fn run(&mut self) -> io::Result<RunResult> {
        let start = Instant::now();
        let stop_reason = loop {
            if let Some(board) = &self.scoreboard {
                board.record(self.controller.quiz());
            }

            match self.controller.quiz().phase() {
                Phase::AwaitingAnswer => {
                    self.print_round()?;
                    match self.read_answer()? {
                        Reply::Pick(index) => self.dispatch(GameEvent::SubmitAnswer(index))?,
                        Reply::Quit => break StopReason::PlayerQuit,
                        Reply::Closed => break StopReason::InputClosed,
                    }
                }
                Phase::ShowingFeedback => self.wait_for_feedback()?,
                Phase::RoundOver => {
                    let message = self.controller.quiz().wrong_answer_message();
                    writeln!(self.output, "\n\x1b[31m✗ {WRONG_TITLE}\x1b[0m")?;
                    if let Some(message) = message {
                        writeln!(self.output, "{message}")?;
                    }
                    write!(self.output, "\x1b[2mPress Enter to continue...\x1b[0m ")?;
                    self.output.flush()?;
                    match self.read_line()? {
                        None => break StopReason::InputClosed,
                        Some(line) if is_quit(&line) => break StopReason::PlayerQuit,
                        Some(_) => self.dispatch(GameEvent::AcknowledgeRoundOver)?,
                    }
                }
                Phase::GameOver => {
                    let tally = self.controller.quiz().final_tally().unwrap_or_default();
                    writeln!(self.output, "\n\x1b[1m{FINAL_SCORE_TITLE}\x1b[0m: {tally}")?;
                    write!(self.output, "Play again? [y/N] ")?;
                    self.output.flush()?;
                    match self.read_line()? {
                        None => break StopReason::InputClosed,
                        Some(line) if line.trim().eq_ignore_ascii_case("y") => {
                            self.dispatch(GameEvent::AcknowledgeGameOver)?
                        }
                        Some(_) => break StopReason::Finished,
                    }
                }
            }
        };

        let quiz = self.controller.quiz();
        Ok(RunResult {
            games_completed: self.controller.games_completed(),
            score: quiz.score(),
            rounds_played: quiz.rounds_played(),
            max_rounds: quiz.max_rounds(),
            stop_reason,
            duration_seconds: start.elapsed().as_secs_f64(),
        })
    }

    fn dispatch(&mut self, event: GameEvent) -> io::Result<()> {
        self.controller.send(event);
        let updates = self.controller.pump(Instant::now());
        self.report(updates)
    }

    fn report(&mut self, updates: Vec<GameUpdate>) -> io::Result<()> {
        for update in updates {
            match update {
                GameUpdate::AnswerResolved(result) if result.correct => {
                    writeln!(
                        self.output,
                        "\x1b[32m✓\x1b[0m Correct! That's {}. Score: {}",
                        result.correct_country, result.score
                    )?;
                }
                GameUpdate::GameReset => writeln!(self.output, "\n\x1b[36mNew game!\x1b[0m")?,
                GameUpdate::Rejected { error, .. } => {
                    writeln!(self.output, "\x1b[33m⚠\x1b[0m {error}")?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn wait_for_feedback(&mut self) -> io::Result<()> {
        let mut frame = 0usize;
        while let Some(deadline) = self.controller.deadline() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            let selected = self.controller.feedback().selected().unwrap_or_default();
            let visual = self.controller.visual(selected, now);
            write!(
                self.output,
                "\r\x1b[36m{}\x1b[0m Flag {} {}",
                spinner_frame(frame),
                selected + 1,
                turn_glyph(visual.rotation_degrees)
            )?;
            self.output.flush()?;
            frame = frame.wrapping_add(1);
            thread::sleep(FRAME_INTERVAL.min(deadline - now));
        }
        if frame > 0 {
            write!(self.output, "\r\x1b[2K")?;
        }
        let updates = self.controller.pump(Instant::now());
        self.report(updates)
    }

    fn print_round(&mut self) -> io::Result<()> {
        let quiz = self.controller.quiz();
        let round = quiz.rounds_played() + 1;
        let header = format!(
            "\n\x1b[1mRound {round}/{}\x1b[0m  Score: {}",
            quiz.max_rounds(),
            quiz.score()
        );
        let prompt = format!(
            "Which one is the flag of \x1b[1m{}\x1b[0m?",
            quiz.target_country()
        );
        let flags: Vec<Vec<String>> = quiz
            .options()
            .iter()
            .map(|country| flag_rows(country, FLAG_WIDTH, FLAG_HEIGHT))
            .collect();

        writeln!(self.output, "{header}")?;
        writeln!(self.output, "{prompt}\n")?;
        for row in 0..FLAG_HEIGHT {
            let line: Vec<&str> = flags.iter().map(|rows| rows[row].as_str()).collect();
            writeln!(self.output, "{GAP}{}", line.join(GAP))?;
        }
        let labels: Vec<String> = (1..=OPTIONS_PER_ROUND)
            .map(|n| format!("{:^width$}", format!("[{n}]"), width = FLAG_WIDTH))
            .collect();
        writeln!(self.output, "{GAP}{}", labels.join(GAP))?;
        Ok(())
    }

    fn read_answer(&mut self) -> io::Result<Reply> {
        loop {
            write!(self.output, "Your answer [1-3, q to quit]: ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(Reply::Closed);
            };
            if is_quit(&line) {
                return Ok(Reply::Quit);
            }
            match line.trim().parse::<usize>() {
                Ok(n) if (1..=OPTIONS_PER_ROUND).contains(&n) => return Ok(Reply::Pick(n - 1)),
                _ => writeln!(self.output, "Please enter 1, 2 or 3.")?,
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

fn is_quit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("q")
}
