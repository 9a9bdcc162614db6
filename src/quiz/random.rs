//! Injectable randomness for round selection.
//!
//! `QuizState` never touches a global RNG. It asks a `RandomSource` to shuffle
//! the candidate pool and to pick the correct index, so tests and replays can
//! supply a seeded or fully scripted sequence.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Source of the two random draws made at the start of every round.
pub trait RandomSource {
    /// Shuffle the candidate pool in place.
    fn shuffle(&mut self, pool: &mut [String]);

    /// Pick an index uniformly from `0..upper`.
    fn pick_index(&mut self, upper: usize) -> usize;
}

impl RandomSource for StdRng {
    fn shuffle(&mut self, pool: &mut [String]) {
        pool.shuffle(self);
    }

    fn pick_index(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

/// Build the standard generator, seeded when a seed is given.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Deterministic source that replays a fixed list of correct indices.
///
/// Shuffling rotates the pool left by one so consecutive rounds still see
/// different options. Picks cycle through the script; an empty script always
/// picks 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    picks: VecDeque<usize>,
}

impl ScriptedSource {
    /// Create a source that yields `picks` in order, cycling when exhausted.
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedSource {
    fn shuffle(&mut self, pool: &mut [String]) {
        if !pool.is_empty() {
            pool.rotate_left(1);
        }
    }

    fn pick_index(&mut self, upper: usize) -> usize {
        match self.picks.pop_front() {
            Some(pick) => {
                self.picks.push_back(pick);
                pick % upper.max(1)
            }
            None => 0,
        }
    }
}
