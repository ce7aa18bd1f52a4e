//! Injected randomness
//!
//! Soil jitter and synthetic confidence histories draw Gaussian noise through
//! [`NoiseSource`] so callers decide whether draws are seeded, entropic or
//! fixed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// A source of zero-mean Gaussian draws
pub trait NoiseSource {
    /// One draw from N(0, std_dev²); zero when `std_dev` is not positive
    fn gaussian(&mut self, std_dev: f64) -> f64;
}

/// Noise drawn from a random number generator
#[derive(Debug, Clone)]
pub struct RngNoise<R>(R);

impl<R: Rng> RngNoise<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngNoise<StdRng> {
    /// Seeded when `seed` is given, otherwise seeded from OS entropy
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(StdRng::seed_from_u64(seed)),
            None => Self::new(StdRng::from_entropy()),
        }
    }
}

impl<R: Rng> NoiseSource for RngNoise<R> {
    fn gaussian(&mut self, std_dev: f64) -> f64 {
        // Normal::new accepts negative spreads
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return 0.0;
        }
        match Normal::new(0.0, std_dev) {
            Ok(normal) => normal.sample(&mut self.0),
            Err(_) => 0.0,
        }
    }
}

/// Deterministic noise: every draw is `sigmas` standard deviations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn gaussian(&mut self, std_dev: f64) -> f64 {
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return 0.0;
        }
        self.0 * std_dev
    }
}
