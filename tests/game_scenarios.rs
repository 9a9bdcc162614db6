//! Whole-game scenarios driven through the public API.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use flagquiz::feedback::FeedbackTiming;
use flagquiz::quiz::{seeded_rng, Outcome, ScriptedSource, DEFAULT_MAX_ROUNDS};
use flagquiz::{GameController, GameEvent, GameUpdate, Phase, QuizError, QuizSettings, QuizState};

/// Quiz whose correct option is always index 0.
fn scripted_quiz(max_rounds: u32) -> QuizState<ScriptedSource> {
    let settings = QuizSettings {
        max_rounds,
        ..QuizSettings::default()
    };
    QuizState::new(settings, ScriptedSource::new([0])).unwrap()
}

fn answer(quiz: &mut QuizState<ScriptedSource>, index: usize) -> Outcome {
    quiz.submit_answer(index).unwrap();
    quiz.resolve_answer().unwrap().outcome
}

#[test]
fn test_perfect_game_scores_every_round() {
    let mut quiz = scripted_quiz(DEFAULT_MAX_ROUNDS);

    for round in 1..DEFAULT_MAX_ROUNDS {
        assert_eq!(answer(&mut quiz, 0), Outcome::Continue);
        assert_eq!(quiz.rounds_played(), round);
    }
    assert_eq!(answer(&mut quiz, 0), Outcome::GameOver);

    assert_eq!(quiz.phase(), Phase::GameOver);
    assert_eq!(quiz.score(), 8);
    assert_eq!(quiz.correct_answers(), 8);
    assert_eq!(quiz.final_tally().as_deref(), Some("8/8"));
}

#[test]
fn test_wrong_answer_costs_a_point_and_waits() {
    let mut quiz = scripted_quiz(DEFAULT_MAX_ROUNDS);
    let picked = quiz.options()[1].clone();

    assert_eq!(answer(&mut quiz, 1), Outcome::RoundOver);
    assert_eq!(quiz.score(), -1);
    assert_eq!(quiz.rounds_played(), 1);
    assert_eq!(
        quiz.wrong_answer_message().unwrap(),
        format!("That's the flag of {picked}. You lose 1 point. Your score is -1.")
    );

    assert_eq!(quiz.acknowledge_round_over().unwrap(), Outcome::Continue);
    assert_eq!(quiz.phase(), Phase::AwaitingAnswer);
    assert_eq!(quiz.rounds_played(), 1);
    assert!(quiz.wrong_answer_message().is_none());
}

#[test]
fn test_alternating_answers_break_even() {
    let mut quiz = scripted_quiz(DEFAULT_MAX_ROUNDS);

    for round in 0..DEFAULT_MAX_ROUNDS {
        if round % 2 == 0 {
            answer(&mut quiz, 0);
        } else {
            assert_eq!(answer(&mut quiz, 2), Outcome::RoundOver);
            quiz.acknowledge_round_over().unwrap();
        }
    }

    assert_eq!(quiz.phase(), Phase::GameOver);
    assert_eq!(quiz.score(), 0);
    assert_eq!(quiz.final_tally().as_deref(), Some("0/8"));
}

#[test]
fn test_wrong_final_answer_shows_notice_before_final_score() {
    let mut quiz = scripted_quiz(1);

    assert_eq!(answer(&mut quiz, 1), Outcome::RoundOver);
    assert!(quiz.final_tally().is_none());
    assert_eq!(quiz.acknowledge_round_over().unwrap(), Outcome::GameOver);
    assert_eq!(quiz.final_tally().as_deref(), Some("-1/1"));

    quiz.acknowledge_game_over().unwrap();
    assert_eq!(quiz.phase(), Phase::AwaitingAnswer);
    assert_eq!(quiz.score(), 0);
    assert_eq!(quiz.rounds_played(), 0);
}

#[test]
fn test_illegal_operations_leave_state_alone() {
    let mut quiz = scripted_quiz(DEFAULT_MAX_ROUNDS);
    let options = quiz.options().clone();

    assert!(matches!(
        quiz.resolve_answer(),
        Err(QuizError::InvalidState { .. })
    ));
    assert!(quiz.acknowledge_round_over().is_err());
    assert!(quiz.acknowledge_game_over().is_err());
    assert_eq!(quiz.submit_answer(3), Err(QuizError::IndexOutOfRange(3)));

    assert_eq!(quiz.phase(), Phase::AwaitingAnswer);
    assert_eq!(quiz.options(), &options);
    assert_eq!(quiz.score(), 0);

    quiz.submit_answer(0).unwrap();
    assert!(quiz.submit_answer(1).is_err());
    assert_eq!(quiz.last_selected_index(), 0);
}

#[test]
fn test_every_round_offers_three_distinct_options() {
    let mut quiz = QuizState::new(QuizSettings::default(), seeded_rng(Some(7))).unwrap();

    for _ in 0..DEFAULT_MAX_ROUNDS {
        let options = quiz.options().clone();
        let distinct: HashSet<&String> = options.iter().collect();
        assert_eq!(distinct.len(), 3);
        assert_eq!(options[quiz.correct_index()], quiz.target_country());

        let correct = quiz.correct_index();
        quiz.submit_answer(correct).unwrap();
        quiz.resolve_answer().unwrap();
    }
    assert_eq!(quiz.final_tally().as_deref(), Some("8/8"));
}

#[test]
fn test_same_seed_same_rounds() {
    let a = QuizState::new(QuizSettings::default(), seeded_rng(Some(42))).unwrap();
    let b = QuizState::new(QuizSettings::default(), seeded_rng(Some(42))).unwrap();
    assert_eq!(a.options(), b.options());
    assert_eq!(a.correct_index(), b.correct_index());
}

#[test]
fn test_controller_plays_a_short_game_in_order() {
    let start = Instant::now();
    let mut game = GameController::new(scripted_quiz(2), FeedbackTiming::from_millis(0, 0));

    // Zero-length feedback settles within the same pump.
    game.send(GameEvent::SubmitAnswer(0));
    let updates = game.pump(start);
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0], GameUpdate::FeedbackStarted { selected: 0 });
    assert!(matches!(&updates[1], GameUpdate::AnswerResolved(r) if r.correct));

    game.send(GameEvent::SubmitAnswer(2));
    game.pump(start + Duration::from_millis(1));
    assert_eq!(game.quiz().phase(), Phase::RoundOver);
    assert_eq!(game.games_completed(), 0);

    game.send(GameEvent::AcknowledgeRoundOver);
    let updates = game.pump(start + Duration::from_millis(2));
    assert_eq!(updates, vec![GameUpdate::Acknowledged(Outcome::GameOver)]);
    assert_eq!(game.quiz().final_tally().as_deref(), Some("0/2"));
    assert_eq!(game.games_completed(), 1);

    game.send(GameEvent::AcknowledgeGameOver);
    game.pump(start + Duration::from_millis(3));
    assert_eq!(game.quiz().phase(), Phase::AwaitingAnswer);
    assert_eq!(game.quiz().score(), 0);
}
