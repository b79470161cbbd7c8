use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of unit-interval noise, advanced only through its own calls.
pub trait NoiseSource {
    /// Returns the next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// Sine-hash sequence: `frac(sin(seed) * 10000)`, then `seed += 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct SineHashNoise {
    seed: i64,
}

impl SineHashNoise {
    pub const DEFAULT_SEED: i64 = 42;

    #[must_use]
    pub fn new(seed: i64) -> Self {
        Self { seed }
    }

    #[must_use]
    pub fn seed(&self) -> i64 {
        self.seed
    }
}

impl Default for SineHashNoise {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl NoiseSource for SineHashNoise {
    fn next_unit(&mut self) -> f64 {
        let x = (self.seed as f64).sin() * 10_000.0;
        self.seed = self.seed.wrapping_add(1);
        let unit = x - x.floor();
        // frac can round up to exactly 1.0.
        if unit >= 1.0 { 0.0 } else { unit }
    }
}

/// `StdRng`-backed noise for generators that only need visual variation.
#[derive(Debug, Clone)]
pub struct SeededNoise {
    rng: StdRng,
}

impl SeededNoise {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}
