//! A single question: three candidate flags and the one being asked for.

use super::random::RandomSource;

/// Number of flags shown per round.
pub const OPTIONS_PER_ROUND: usize = 3;

/// One question cycle.
///
/// Created fresh at every round start and replaced once the answer resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    options: [String; OPTIONS_PER_ROUND],
    correct_index: usize,
}

impl Round {
    /// Draw a new round.
    ///
    /// Shuffles `pool` in place and takes its first three entries, then picks
    /// the correct index with a separate draw. The pool must hold at least
    /// three entries; `QuizSettings::validate` guarantees that.
    pub(crate) fn draw<R: RandomSource + ?Sized>(pool: &mut [String], rng: &mut R) -> Self {
        rng.shuffle(pool);
        let options = std::array::from_fn(|i| pool[i].clone());
        let correct_index = rng.pick_index(OPTIONS_PER_ROUND);
        Self {
            options,
            correct_index,
        }
    }

    /// The three countries on offer, in display order.
    pub fn options(&self) -> &[String; OPTIONS_PER_ROUND] {
        &self.options
    }

    /// Index into `options` of the right answer.
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// The country the player is asked to find.
    pub fn target_country(&self) -> &str {
        &self.options[self.correct_index]
    }

    /// Country shown at `index`, if in range.
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    /// Whether `index` is the right answer.
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::random::{seeded_rng, ScriptedSource};
    use std::collections::HashSet;

    fn pool() -> Vec<String> {
        crate::quiz::DEFAULT_COUNTRIES
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_draw_takes_first_three_after_shuffle() {
        let mut pool = pool();
        let mut source = ScriptedSource::new([1]);
        let round = Round::draw(&mut pool, &mut source);

        assert_eq!(round.options(), &["Estonia", "France", "Germany"]);
        assert_eq!(round.correct_index(), 1);
        assert_eq!(round.target_country(), "France");
    }

    #[test]
    fn test_draw_options_distinct_and_from_pool() {
        let mut pool = pool();
        let all: HashSet<String> = pool.iter().cloned().collect();
        let mut rng = seeded_rng(Some(3));

        for _ in 0..200 {
            let round = Round::draw(&mut pool, &mut rng);
            let unique: HashSet<&String> = round.options().iter().collect();
            assert_eq!(unique.len(), OPTIONS_PER_ROUND);
            assert!(round.options().iter().all(|c| all.contains(c)));
            assert!(round.correct_index() < OPTIONS_PER_ROUND);
        }
    }

    #[test]
    fn test_correct_index_covers_all_positions() {
        let mut pool = pool();
        let mut rng = seeded_rng(Some(11));
        let mut seen = HashSet::new();
        for _ in 0..100 {
            seen.insert(Round::draw(&mut pool, &mut rng).correct_index());
        }
        assert_eq!(seen.len(), OPTIONS_PER_ROUND);
    }

    #[test]
    fn test_option_lookup() {
        let mut pool = pool();
        let round = Round::draw(&mut pool, &mut ScriptedSource::new([0]));
        assert_eq!(round.option(2), Some("Germany"));
        assert_eq!(round.option(3), None);
        assert!(round.is_correct(0));
        assert!(!round.is_correct(2));
    }
}
