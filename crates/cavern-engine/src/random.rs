//! Injectable randomness for `random` conditions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of percentile draws in `0..100`.
///
/// Any `FnMut() -> u8` closure is a source, which keeps tests deterministic:
/// `let mut always_low = || 0;`.
pub trait RandomSource {
    /// Draw a value in `0..100`.
    fn percent(&mut self) -> u8;
}

impl<F: FnMut() -> u8> RandomSource for F {
    fn percent(&mut self) -> u8 {
        self() % 100
    }
}

/// Uniform draws from a standard RNG.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Reproducible draws from a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn percent(&mut self) -> u8 {
        self.rng.random_range(0..100)
    }
}
