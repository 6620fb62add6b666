//! Tick values published by a ticker.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;

/// A single tick: the moment a jittered delay elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tick {
    /// Loop iteration that produced this tick, starting at 1.
    ///
    /// Counts dropped ticks too, so a gap between consecutive values means the
    /// consumer missed ticks while it was busy.
    pub seq: u64,
    /// Monotonic time of the tick. Follows the paused clock in tests.
    #[serde(skip)]
    pub instant: Instant,
    /// Wall-clock time of the tick
    pub timestamp: DateTime<Utc>,
}

impl Tick {
    pub(crate) fn now(seq: u64) -> Self {
        Self {
            seq,
            instant: Instant::now(),
            timestamp: Utc::now(),
        }
    }

    /// Number of ticks dropped between `previous` and this one
    pub fn missed_since(&self, previous: &Tick) -> u64 {
        self.seq.saturating_sub(previous.seq).saturating_sub(1)
    }
}
