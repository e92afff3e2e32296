//! Seeded random source for gameplay draws

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Deterministic bounded-integer generator
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    inner: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `[min, max]` (both inclusive). Swapped bounds are
    /// accepted.
    pub fn int_in(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.inner.random_range(lo..=hi)
    }
}
