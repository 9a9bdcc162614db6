//! Game rules: round setup, answer checking, scoring and termination.
//!
//! `QuizState` is the authoritative state machine. It knows nothing about
//! time or rendering; the feedback delay lives in `crate::feedback` and the
//! two are wired together by `crate::runner::GameController`.

pub mod random;
mod round;

use std::collections::HashSet;
use std::fmt;

use rand::rngs::StdRng;
use tracing::{debug, info};

pub use random::{seeded_rng, RandomSource, ScriptedSource};
pub use round::{Round, OPTIONS_PER_ROUND};

/// Rounds per game unless configured otherwise.
pub const DEFAULT_MAX_ROUNDS: u32 = 8;

/// The candidate pool used when no countries are configured.
pub const DEFAULT_COUNTRIES: &[&str] = &[
    "Pakistan", "Estonia", "France", "Germany", "Ireland", "Italy", "Nigeria", "Poland", "Russia",
    "Spain", "UK", "US",
];

/// Title of the notice shown after a wrong answer.
pub const WRONG_TITLE: &str = "Wrong";

/// Title of the notice shown when the game ends.
pub const FINAL_SCORE_TITLE: &str = "Final score";

/// Coarse state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for the player to pick a flag.
    AwaitingAnswer,
    /// A pick was made; the feedback animation is playing.
    ShowingFeedback,
    /// The last answer was wrong; waiting for the player to continue.
    RoundOver,
    /// All rounds are done; waiting for the player to start again.
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::AwaitingAnswer => write!(f, "awaiting answer"),
            Phase::ShowingFeedback => write!(f, "showing feedback"),
            Phase::RoundOver => write!(f, "round over"),
            Phase::GameOver => write!(f, "game over"),
        }
    }
}

/// Where the game goes after an answer or acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new round has started.
    Continue,
    /// Blocked on the "Wrong" notice.
    RoundOver,
    /// Blocked on the final score.
    GameOver,
}

/// Details of a resolved answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    /// Option index the player picked.
    pub selected_index: usize,
    /// Country of the picked flag.
    pub selected_country: String,
    /// Country the round asked for.
    pub correct_country: String,
    /// Whether the pick was right.
    pub correct: bool,
    /// Score after applying this answer.
    pub score: i32,
    /// Resulting transition.
    pub outcome: Outcome,
}

/// Errors raised by the state machine. None of them change state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    /// Operation not legal in the current phase.
    #[error("Cannot {operation} while {phase}")]
    InvalidState {
        /// The rejected operation.
        operation: &'static str,
        /// Phase at the time of the call.
        phase: Phase,
    },
    /// Answer index outside the options shown.
    #[error("Answer index {0} is out of range (expected 0-2)")]
    IndexOutOfRange(usize),
    /// Settings cannot produce a playable game.
    #[error("Invalid quiz settings: {0}")]
    InvalidSettings(String),
}

/// Rules a game is played with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    /// Rounds before the game ends.
    pub max_rounds: u32,
    /// Candidate pool the options are drawn from.
    pub countries: Vec<String>,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            countries: DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl QuizSettings {
    /// Check the settings can produce a playable game.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.max_rounds == 0 {
            return Err(QuizError::InvalidSettings(
                "max_rounds must be at least 1".into(),
            ));
        }
        if self.countries.iter().any(|c| c.trim().is_empty()) {
            return Err(QuizError::InvalidSettings(
                "country names must not be empty".into(),
            ));
        }
        let distinct: HashSet<&str> = self.countries.iter().map(String::as_str).collect();
        if distinct.len() != self.countries.len() {
            return Err(QuizError::InvalidSettings(
                "country names must be distinct".into(),
            ));
        }
        if distinct.len() < OPTIONS_PER_ROUND {
            return Err(QuizError::InvalidSettings(format!(
                "need at least {OPTIONS_PER_ROUND} countries, got {}",
                distinct.len()
            )));
        }
        Ok(())
    }
}

/// The game-state machine for one play session.
#[derive(Debug)]
pub struct QuizState<R = StdRng> {
    rng: R,
    pool: Vec<String>,
    round: Round,
    score: i32,
    rounds_played: u32,
    max_rounds: u32,
    correct_answers: u32,
    last_selected_index: usize,
    last_result: Option<AnswerResult>,
    phase: Phase,
}

impl<R: RandomSource> QuizState<R> {
    /// Create a session and start its first round.
    pub fn new(settings: QuizSettings, mut rng: R) -> Result<Self, QuizError> {
        settings.validate()?;
        let mut pool = settings.countries;
        let round = Round::draw(&mut pool, &mut rng);
        info!(
            max_rounds = settings.max_rounds,
            pool = pool.len(),
            "new quiz session"
        );
        Ok(Self {
            rng,
            pool,
            round,
            score: 0,
            rounds_played: 0,
            max_rounds: settings.max_rounds,
            correct_answers: 0,
            last_selected_index: 0,
            last_result: None,
            phase: Phase::AwaitingAnswer,
        })
    }

    /// Replace the current round with a freshly drawn one.
    pub fn start_round(&mut self) {
        self.round = Round::draw(&mut self.pool, &mut self.rng);
        self.phase = Phase::AwaitingAnswer;
        debug!(
            round = self.rounds_played + 1,
            country = self.round.target_country(),
            "round started"
        );
    }

    /// Record the player's pick and hand over to the feedback sequence.
    ///
    /// Scoring happens later in [`resolve_answer`](Self::resolve_answer).
    pub fn submit_answer(&mut self, selected_index: usize) -> Result<(), QuizError> {
        self.require(Phase::AwaitingAnswer, "submit an answer")?;
        if selected_index >= OPTIONS_PER_ROUND {
            return Err(QuizError::IndexOutOfRange(selected_index));
        }
        self.last_selected_index = selected_index;
        self.phase = Phase::ShowingFeedback;
        debug!(selected_index, "answer submitted");
        Ok(())
    }

    /// Score the pending answer once feedback has finished playing.
    pub fn resolve_answer(&mut self) -> Result<AnswerResult, QuizError> {
        self.require(Phase::ShowingFeedback, "resolve an answer")?;

        let selected_index = self.last_selected_index;
        let correct = self.round.is_correct(selected_index);
        let selected_country = self.round.options()[selected_index].clone();
        let correct_country = self.round.target_country().to_string();

        self.rounds_played += 1;
        let outcome = if correct {
            self.score += 1;
            self.correct_answers += 1;
            if self.is_last_round() {
                self.phase = Phase::GameOver;
                Outcome::GameOver
            } else {
                self.start_round();
                Outcome::Continue
            }
        } else {
            self.score -= 1;
            self.phase = Phase::RoundOver;
            Outcome::RoundOver
        };

        let result = AnswerResult {
            selected_index,
            selected_country,
            correct_country,
            correct,
            score: self.score,
            outcome,
        };
        debug!(
            correct,
            score = self.score,
            rounds_played = self.rounds_played,
            ?outcome,
            "answer resolved"
        );
        if outcome == Outcome::GameOver {
            info!(tally = %self.tally(), "game over");
        }
        self.last_result = Some(result.clone());
        Ok(result)
    }

    /// Dismiss the "Wrong" notice.
    pub fn acknowledge_round_over(&mut self) -> Result<Outcome, QuizError> {
        self.require(Phase::RoundOver, "continue")?;
        if self.is_last_round() {
            self.phase = Phase::GameOver;
            info!(tally = %self.tally(), "game over");
            Ok(Outcome::GameOver)
        } else {
            self.start_round();
            Ok(Outcome::Continue)
        }
    }

    /// Dismiss the final score and start a new game.
    pub fn acknowledge_game_over(&mut self) -> Result<(), QuizError> {
        self.require(Phase::GameOver, "start a new game")?;
        self.reset_game();
        Ok(())
    }

    /// Zero the session and start a fresh first round. Legal in any phase.
    pub fn reset_game(&mut self) {
        self.score = 0;
        self.last_selected_index = 0;
        self.rounds_played = 0;
        self.correct_answers = 0;
        self.last_result = None;
        self.start_round();
        info!("game reset");
    }

    /// Current round.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// The three countries on offer.
    pub fn options(&self) -> &[String; OPTIONS_PER_ROUND] {
        self.round.options()
    }

    /// Index of the right answer in the current round.
    pub fn correct_index(&self) -> usize {
        self.round.correct_index()
    }

    /// Country to prompt for.
    pub fn target_country(&self) -> &str {
        self.round.target_country()
    }

    /// Running score.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Completed rounds.
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Rounds per game.
    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Correct answers so far.
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    /// Option index last picked.
    pub fn last_selected_index(&self) -> usize {
        self.last_selected_index
    }

    /// Most recently resolved answer, cleared on reset.
    pub fn last_result(&self) -> Option<&AnswerResult> {
        self.last_result.as_ref()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Body of the "Wrong" notice, available while the round is over.
    pub fn wrong_answer_message(&self) -> Option<String> {
        if self.phase != Phase::RoundOver {
            return None;
        }
        let country = &self.round.options()[self.last_selected_index];
        Some(format!(
            "That's the flag of {country}. You lose 1 point. Your score is {}.",
            self.score
        ))
    }

    /// "score/max_rounds", available once the game is over.
    pub fn final_tally(&self) -> Option<String> {
        (self.phase == Phase::GameOver).then(|| self.tally())
    }

    fn tally(&self) -> String {
        format!("{}/{}", self.score, self.max_rounds)
    }

    fn is_last_round(&self) -> bool {
        self.rounds_played >= self.max_rounds
    }

    fn require(&self, phase: Phase, operation: &'static str) -> Result<(), QuizError> {
        if self.phase == phase {
            Ok(())
        } else {
            debug!(operation, phase = %self.phase, "rejected");
            Err(QuizError::InvalidState {
                operation,
                phase: self.phase,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(picks: impl IntoIterator<Item = usize>) -> QuizState<ScriptedSource> {
        QuizState::new(QuizSettings::default(), ScriptedSource::new(picks)).unwrap()
    }

    fn answer<R: RandomSource>(state: &mut QuizState<R>, index: usize) -> AnswerResult {
        state.submit_answer(index).unwrap();
        state.resolve_answer().unwrap()
    }

    fn wrong_index<R: RandomSource>(state: &QuizState<R>) -> usize {
        (state.correct_index() + 1) % OPTIONS_PER_ROUND
    }

    #[test]
    fn test_new_starts_first_round() {
        let state = scripted([2]);
        assert_eq!(state.phase(), Phase::AwaitingAnswer);
        assert_eq!(state.score(), 0);
        assert_eq!(state.rounds_played(), 0);
        assert_eq!(state.max_rounds(), DEFAULT_MAX_ROUNDS);
        assert_eq!(state.correct_index(), 2);
        assert_eq!(state.target_country(), state.options()[2]);
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let settings = QuizSettings {
            max_rounds: 0,
            ..Default::default()
        };
        let err = QuizState::new(settings, ScriptedSource::default()).unwrap_err();
        assert!(matches!(err, QuizError::InvalidSettings(_)));
    }

    #[test]
    fn test_settings_validate() {
        assert!(QuizSettings::default().validate().is_ok());

        let too_few = QuizSettings {
            countries: vec!["A".into(), "B".into()],
            ..Default::default()
        };
        assert!(too_few.validate().is_err());

        let duplicate = QuizSettings {
            countries: vec!["A".into(), "B".into(), "A".into(), "C".into()],
            ..Default::default()
        };
        assert!(duplicate.validate().is_err());

        let blank = QuizSettings {
            countries: vec!["A".into(), " ".into(), "C".into()],
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_submit_defers_scoring() {
        let mut state = scripted([0]);
        state.submit_answer(0).unwrap();

        assert_eq!(state.phase(), Phase::ShowingFeedback);
        assert_eq!(state.last_selected_index(), 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.rounds_played(), 0);
    }

    #[test]
    fn test_submit_rejected_outside_awaiting_answer() {
        let mut state = scripted([1]);
        state.submit_answer(0).unwrap();
        let correct_before = state.correct_index();

        let err = state.submit_answer(1).unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidState {
                operation: "submit an answer",
                phase: Phase::ShowingFeedback,
            }
        );
        assert_eq!(state.last_selected_index(), 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.rounds_played(), 0);
        assert_eq!(state.correct_index(), correct_before);
    }

    #[test]
    fn test_submit_rejects_out_of_range_index() {
        let mut state = scripted([0]);
        assert_eq!(
            state.submit_answer(3).unwrap_err(),
            QuizError::IndexOutOfRange(3)
        );
        assert_eq!(state.phase(), Phase::AwaitingAnswer);
    }

    #[test]
    fn test_resolve_requires_feedback_phase() {
        let mut state = scripted([0]);
        assert!(matches!(
            state.resolve_answer(),
            Err(QuizError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_correct_answer_continues_without_notice() {
        let mut state = scripted([1, 2]);
        let result = answer(&mut state, 1);

        assert!(result.correct);
        assert_eq!(result.outcome, Outcome::Continue);
        assert_eq!(state.score(), 1);
        assert_eq!(state.rounds_played(), 1);
        assert_eq!(state.phase(), Phase::AwaitingAnswer);
        assert_eq!(state.correct_index(), 2);
        assert!(state.wrong_answer_message().is_none());
    }

    #[test]
    fn test_wrong_answer_blocks_on_notice() {
        let mut state = scripted([0]);
        let tapped = state.options()[2].clone();
        let result = answer(&mut state, 2);

        assert!(!result.correct);
        assert_eq!(result.outcome, Outcome::RoundOver);
        assert_eq!(result.selected_country, tapped);
        assert_eq!(state.phase(), Phase::RoundOver);
        assert_eq!(state.score(), -1);
        assert_eq!(state.rounds_played(), 1);

        let message = state.wrong_answer_message().unwrap();
        assert!(message.contains(&tapped));
        assert!(message.contains("1 point"));
        assert!(message.contains("-1"));
    }

    #[test]
    fn test_acknowledge_round_over_starts_next_round() {
        let mut state = scripted([0]);
        answer(&mut state, 1);

        assert_eq!(state.acknowledge_round_over().unwrap(), Outcome::Continue);
        assert_eq!(state.phase(), Phase::AwaitingAnswer);
        assert_eq!(state.rounds_played(), 1);
    }

    #[test]
    fn test_acknowledge_round_over_rejected_elsewhere() {
        let mut state = scripted([0]);
        assert!(state.acknowledge_round_over().is_err());
        assert!(state.acknowledge_game_over().is_err());
        assert_eq!(state.phase(), Phase::AwaitingAnswer);
    }

    #[test]
    fn test_eight_correct_answers_end_the_game() {
        let mut state = scripted([0, 1, 2]);
        for _ in 0..DEFAULT_MAX_ROUNDS {
            let index = state.correct_index();
            answer(&mut state, index);
        }

        assert_eq!(state.score(), 8);
        assert_eq!(state.correct_answers(), 8);
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.final_tally().as_deref(), Some("8/8"));
    }

    #[test]
    fn test_wrong_final_answer_goes_through_round_over() {
        let settings = QuizSettings {
            max_rounds: 1,
            ..Default::default()
        };
        let mut state = QuizState::new(settings, ScriptedSource::new([0])).unwrap();
        answer(&mut state, 2);

        assert_eq!(state.phase(), Phase::RoundOver);
        assert!(state.final_tally().is_none());
        assert_eq!(state.acknowledge_round_over().unwrap(), Outcome::GameOver);
        assert_eq!(state.final_tally().as_deref(), Some("-1/1"));
    }

    #[test]
    fn test_alternating_answers_score_zero() {
        let mut state = scripted([2, 0, 1, 1]);
        for round in 0..DEFAULT_MAX_ROUNDS {
            if round % 2 == 0 {
                let index = state.correct_index();
                answer(&mut state, index);
            } else {
                let index = wrong_index(&state);
                answer(&mut state, index);
                state.acknowledge_round_over().unwrap();
            }
        }

        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.score(), 0);
        assert_eq!(state.rounds_played(), DEFAULT_MAX_ROUNDS);
    }

    #[test]
    fn test_game_over_only_left_by_reset() {
        let settings = QuizSettings {
            max_rounds: 1,
            ..Default::default()
        };
        let mut state = QuizState::new(settings, ScriptedSource::new([1])).unwrap();
        answer(&mut state, 1);
        assert_eq!(state.phase(), Phase::GameOver);

        assert!(state.submit_answer(0).is_err());
        assert!(state.resolve_answer().is_err());
        assert!(state.acknowledge_round_over().is_err());
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.rounds_played(), 1);
    }

    #[test]
    fn test_acknowledge_game_over_resets() {
        let settings = QuizSettings {
            max_rounds: 2,
            ..Default::default()
        };
        let mut state = QuizState::new(settings, ScriptedSource::new([0])).unwrap();
        answer(&mut state, 0);
        answer(&mut state, 2);
        state.acknowledge_round_over().unwrap();
        assert_eq!(state.phase(), Phase::GameOver);

        state.acknowledge_game_over().unwrap();
        assert_eq!(state.phase(), Phase::AwaitingAnswer);
        assert_eq!(state.score(), 0);
        assert_eq!(state.rounds_played(), 0);
        assert_eq!(state.last_selected_index(), 0);
        assert!(state.last_result().is_none());
    }

    #[test]
    fn test_reset_from_any_phase() {
        let mut state = scripted([0]);
        state.submit_answer(1).unwrap();
        state.reset_game();
        assert_eq!(state.phase(), Phase::AwaitingAnswer);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_rounds_never_exceed_max() {
        let mut state = QuizState::new(QuizSettings::default(), seeded_rng(Some(5))).unwrap();
        let mut previous = 0;
        while state.phase() != Phase::GameOver {
            match state.phase() {
                Phase::AwaitingAnswer => {
                    state.submit_answer(0).unwrap();
                    state.resolve_answer().unwrap();
                }
                Phase::RoundOver => {
                    state.acknowledge_round_over().unwrap();
                }
                other => panic!("unexpected phase {other}"),
            }
            assert!(state.rounds_played() >= previous);
            assert!(state.rounds_played() <= state.max_rounds());
            previous = state.rounds_played();
        }
        assert_eq!(state.rounds_played(), DEFAULT_MAX_ROUNDS);
        let incorrect = state.rounds_played() - state.correct_answers();
        assert_eq!(
            state.score(),
            state.correct_answers() as i32 - incorrect as i32
        );
    }

    #[test]
    fn test_quiz_error_display() {
        let err = QuizError::InvalidState {
            operation: "submit an answer",
            phase: Phase::GameOver,
        };
        assert_eq!(err.to_string(), "Cannot submit an answer while game over");
        assert!(QuizError::IndexOutOfRange(7).to_string().contains('7'));
    }
}
