//! Dice Roller
//!
//! Single injectable random source. Every component that needs randomness
//! (fallback prices, stock values, pool shuffles, chance gates) draws from one
//! of these so tests can seed a deterministic sequence.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Seedable random source shared by the whole engine
pub struct DiceRoller {
    rng: StdRng,
}

impl DiceRoller {
    /// Create a roller seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a roller with a fixed seed (deterministic sequences for tests)
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `[min, max]` inclusive
    pub fn range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Uniform float in `[0, 1)`
    pub fn unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    /// True with the given probability (clamped to `[0, 1]`)
    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability.clamp(0.0, 1.0)
    }

    /// Uniform percentage roll in `[0, 100)`
    pub fn percent(&mut self) -> f64 {
        self.unit() * 100.0
    }

    /// Shuffle a slice in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Pick an index into a collection of the given length
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.rng.gen_range(0..len)
    }
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self::new()
    }
}
