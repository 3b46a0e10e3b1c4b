//! # Uniform Randomness
//!
//! Explicit, seedable uniform randomness for selection modules.
//!
//! There is deliberately no process-global generator: the host seeds one
//! `SeededUniform` at startup and lends it to each module invocation
//! through `EventContext`. A module must consume exactly one draw per
//! candidate examined, in its documented iteration order — that contract,
//! plus the seed, makes every selection sequence reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed used when the host does not configure one.
pub const DEFAULT_SEED: u64 = 0x6b69_7261_6e5f_7264;

/// Source of independent uniform draws in `[0, 1)`.
pub trait UniformSource {
    /// Draw the next uniform value in `[0, 1)`.
    fn uniform(&mut self) -> f64;
}

/// ChaCha8-backed uniform source with a fixed seed lifecycle.
///
/// Seeded once at process start; the seed fully determines the draw
/// sequence across all events of a run.
#[derive(Debug, Clone)]
pub struct SeededUniform {
    rng: ChaCha8Rng,
}

impl SeededUniform {
    /// Create a source from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededUniform {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl UniformSource for SeededUniform {
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
