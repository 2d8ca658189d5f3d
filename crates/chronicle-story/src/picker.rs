// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Injectable random choice.
//!
//! The composer never calls a random number generator directly; it asks a
//! [`Picker`] for an index. Production uses [`ThreadPicker`]; tests and the
//! `--seed` flag substitute [`SeededPicker`] so a run can be replayed
//! exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of index choices for template selection.
pub trait Picker {
    /// Returns an index in `0..len`. Callers guarantee `len > 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Picks with the thread-local generator; different every run.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPicker;

impl Picker for ThreadPicker {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Picks with a seeded generator; the same seed replays the same choices.
#[derive(Debug, Clone)]
pub struct SeededPicker {
    rng: StdRng,
}

impl SeededPicker {
    /// Creates a picker whose choice sequence is fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        SeededPicker {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Picker for SeededPicker {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_picker_replays_the_same_sequence() {
        let mut a = SeededPicker::new(42);
        let mut b = SeededPicker::new(42);
        let picks_a: Vec<usize> = (0..20).map(|_| a.pick_index(7)).collect();
        let picks_b: Vec<usize> = (0..20).map(|_| b.pick_index(7)).collect();
        similar_asserts::assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn different_seeds_usually_diverge() {
        let mut a = SeededPicker::new(1);
        let mut b = SeededPicker::new(2);
        let picks_a: Vec<usize> = (0..20).map(|_| a.pick_index(100)).collect();
        let picks_b: Vec<usize> = (0..20).map(|_| b.pick_index(100)).collect();
        assert_ne!(picks_a, picks_b);
    }

    #[test]
    fn picks_stay_in_range() {
        let mut picker = SeededPicker::new(7);
        for len in 1..50 {
            let idx = picker.pick_index(len);
            assert!(idx < len, "index {idx} out of range for len {len}");
        }
        let mut thread = ThreadPicker;
        for len in 1..50 {
            assert!(thread.pick_index(len) < len);
        }
    }

    #[test]
    fn single_element_pool_always_picks_zero() {
        let mut picker = SeededPicker::new(9);
        for _ in 0..10 {
            similar_asserts::assert_eq!(picker.pick_index(1), 0);
        }
    }
}
