//! Injectable randomness for the scoring jitter term.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the bounded random jitter added to open venues' scores.
///
/// Implementations return a value in `-amplitude..=amplitude`. Injecting the
/// source keeps scoring replayable: tests pin it to zero or a fixed value,
/// production batches seed it per run.
pub trait JitterSource {
    /// Draw the next jitter value in `-amplitude..=amplitude`.
    fn sample(&mut self, amplitude: f64) -> f64;
}

/// Jitter drawn uniformly from a seeded ChaCha stream.
///
/// Two batches started with the same seed draw identical jitter sequences.
#[derive(Debug, Clone)]
pub struct SeededJitter {
    rng: ChaCha8Rng,
}

impl SeededJitter {
    /// Construct from a per-run seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl JitterSource for SeededJitter {
    #[expect(
        clippy::float_arithmetic,
        reason = "the jitter range is symmetric about zero"
    )]
    fn sample(&mut self, amplitude: f64) -> f64 {
        if amplitude <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-amplitude..=amplitude)
    }
}

/// Jitter pinned to zero for fully deterministic scoring.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn sample(&mut self, _amplitude: f64) -> f64 {
        0.0
    }
}
