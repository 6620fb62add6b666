//! Normally distributed jitter around the nominal interval.

use std::time::Duration;

use chrono::TimeDelta;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};

use super::Jitter;
use crate::error::{JitterbugError, Result};

/// Adds an offset drawn from `N(mean, stdev)` to the nominal interval.
///
/// `mean` is signed so a ticker can be biased early or late. Delays that
/// would fall below zero saturate to [`Duration::ZERO`].
#[derive(Debug, Clone)]
pub struct Normal {
    mean_ns: f64,
    stdev_ns: f64,
    rng: StdRng,
}

impl Normal {
    /// Create a normal strategy seeded from the operating system.
    pub fn new(mean: TimeDelta, stdev: Duration) -> Result<Self> {
        Self::with_rng(mean, stdev, StdRng::from_os_rng())
    }

    /// Create a normal strategy with a fixed seed, for reproducible delays.
    pub fn with_seed(mean: TimeDelta, stdev: Duration, seed: u64) -> Result<Self> {
        Self::with_rng(mean, stdev, StdRng::seed_from_u64(seed))
    }

    fn with_rng(mean: TimeDelta, stdev: Duration, rng: StdRng) -> Result<Self> {
        let mean_ns = mean
            .num_nanoseconds()
            .ok_or_else(|| JitterbugError::InvalidJitter(format!("mean {} overflows nanoseconds", mean)))?;
        // A Duration is always finite and non-negative, so any stdev scales N(0, 1)
        Ok(Self {
            mean_ns: mean_ns as f64,
            stdev_ns: stdev.as_nanos() as f64,
            rng,
        })
    }
}

impl Jitter for Normal {
    fn jitter(&mut self, nominal: Duration) -> Duration {
        let z: f64 = StandardNormal.sample(&mut self.rng);
        let delay_ns = nominal.as_nanos() as f64 + self.mean_ns + self.stdev_ns * z;
        if delay_ns <= 0.0 {
            return Duration::ZERO;
        }
        // f64 -> u64 casts saturate
        Duration::from_nanos(delay_ns as u64)
    }
}
