//! Uniform jitter: delays spread evenly between a floor and the nominal interval.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Jitter;

/// Draws each delay uniformly from `[min, nominal)`.
///
/// When the nominal interval is not larger than `min` there is nothing to
/// spread over and `min` is returned.
#[derive(Debug, Clone)]
pub struct Uniform {
    min: Duration,
    rng: StdRng,
}

impl Uniform {
    /// Create a uniform strategy seeded from the operating system.
    pub fn new(min: Duration) -> Self {
        Self {
            min,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a uniform strategy with a fixed seed, for reproducible delays.
    pub fn with_seed(min: Duration, seed: u64) -> Self {
        Self {
            min,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Lower bound of every delay
    pub fn min(&self) -> Duration {
        self.min
    }
}

impl Jitter for Uniform {
    fn jitter(&mut self, nominal: Duration) -> Duration {
        let span = nominal.saturating_sub(self.min).as_nanos();
        if span == 0 {
            return self.min;
        }
        let span = u64::try_from(span).unwrap_or(u64::MAX);
        self.min + Duration::from_nanos(self.rng.random_range(0..span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_stays_in_range() {
        let mut j = Uniform::with_seed(Duration::from_millis(20), 7);
        let nominal = Duration::from_millis(100);
        for _ in 0..1000 {
            let d = j.jitter(nominal);
            assert!(d >= Duration::from_millis(20), "{:?} below min", d);
            assert!(d < nominal, "{:?} not below nominal", d);
        }
    }

    #[test]
    fn test_uniform_returns_min_when_nominal_not_above_min() {
        let mut j = Uniform::with_seed(Duration::from_millis(50), 1);
        assert_eq!(j.jitter(Duration::from_millis(50)), Duration::from_millis(50));
        assert_eq!(j.jitter(Duration::from_millis(10)), Duration::from_millis(50));
    }

    #[test]
    fn test_uniform_zero_min_zero_nominal() {
        let mut j = Uniform::with_seed(Duration::ZERO, 1);
        assert_eq!(j.jitter(Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn test_uniform_same_seed_same_sequence() {
        let mut a = Uniform::with_seed(Duration::ZERO, 42);
        let mut b = Uniform::with_seed(Duration::ZERO, 42);
        let nominal = Duration::from_secs(1);
        let xs: Vec<_> = (0..16).map(|_| a.jitter(nominal)).collect();
        let ys: Vec<_> = (0..16).map(|_| b.jitter(nominal)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_uniform_actually_varies() {
        let mut j = Uniform::with_seed(Duration::ZERO, 3);
        let nominal = Duration::from_secs(1);
        let first = j.jitter(nominal);
        assert!((0..32).any(|_| j.jitter(nominal) != first));
    }
}
