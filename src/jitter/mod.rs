//! Jitter strategies
//!
//! A [`Jitter`] turns the nominal interval of a ticker into the delay that is
//! actually waited before the next tick. Strategies may keep state (a random
//! source, a counter) but the ticker only ever sees the returned delay.

mod normal;
mod uniform;

use std::fmt;
use std::time::Duration;

pub use normal::Normal;
pub use uniform::Uniform;

/// Maps a nominal interval to the delay before the next tick.
///
/// The ticker calls this once per iteration from its own task, never
/// concurrently with itself. Returning [`Duration::ZERO`] makes the next tick
/// fire immediately.
pub trait Jitter {
    fn jitter(&mut self, nominal: Duration) -> Duration;
}

impl<J: Jitter + ?Sized> Jitter for Box<J> {
    fn jitter(&mut self, nominal: Duration) -> Duration {
        (**self).jitter(nominal)
    }
}

impl<J: Jitter + ?Sized> Jitter for &mut J {
    fn jitter(&mut self, nominal: Duration) -> Duration {
        (**self).jitter(nominal)
    }
}

/// Identity strategy: waits exactly the nominal interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn jitter(&mut self, nominal: Duration) -> Duration {
        nominal
    }
}

/// Strategy backed by a closure. Created with [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

impl<F> Jitter for FromFn<F>
where
    F: FnMut(Duration) -> Duration,
{
    fn jitter(&mut self, nominal: Duration) -> Duration {
        (self.f)(nominal)
    }
}

/// Build a strategy from a closure.
///
/// ```
/// use std::time::Duration;
/// use jitterbug::jitter::{from_fn, Jitter};
///
/// let mut late = from_fn(|d| d + Duration::from_millis(5));
/// assert_eq!(late.jitter(Duration::from_millis(10)), Duration::from_millis(15));
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut(Duration) -> Duration,
{
    FromFn { f }
}
