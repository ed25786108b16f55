//! Seeded RNG used by obstacle generation
//!
//! Seeded explicitly so a run can be replayed from its seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Bounded sampling over a seeded PCG stream
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this stream was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform sample in `[min, max)`; returns `min` when the range is empty
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.random_range(min..max)
        } else {
            min
        }
    }

    /// Uniform sample in `[center - spread, center + spread)`
    #[inline]
    pub fn around(&mut self, center: f32, spread: f32) -> f32 {
        self.range(center - spread, center + spread)
    }
}
