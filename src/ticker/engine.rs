//! Ticker engine - a background loop that ticks after jittered delays.
//!
//! Each iteration of the loop:
//! 1. Asks the jitter strategy for the next delay
//! 2. Sleeps for that delay unless stopped first
//! 3. Offers the tick to the consumer without blocking, dropping it if the
//!    consumer already has one pending
//!
//! The output channel closes once the loop observes the stop signal and exits.

use std::pin::Pin;
use std::task::{Context, Poll, ready};
use std::time::Duration;

use futures::Stream;
use tokio::sync::mpsc::error::{TryRecvError, TrySendError};
use tokio::sync::{mpsc, watch};
use tokio::time;
use tracing::{debug, trace};

use super::stop::StopHandle;
use super::tick::Tick;
use crate::jitter::Jitter;

/// A ticker whose period is perturbed by a [`Jitter`] strategy.
///
/// Behaves like a [`tokio::time::Interval`] that drives itself: the loop runs
/// in its own task from construction until [`Ticker::stop`] is called or the
/// ticker is dropped. At most one tick waits for the consumer; ticks that come
/// due while one is pending are dropped.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    rx: mpsc::Receiver<Tick>,
    stop: StopHandle,
}

impl Ticker {
    /// Create a ticker with nominal interval `interval` and start ticking.
    ///
    /// The interval is not validated; the jitter strategy decides what it means.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn new<J>(interval: Duration, jitter: J) -> Self
    where
        J: Jitter + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(1);
        let (stop, stopped) = StopHandle::channel();

        tokio::spawn(run(interval, jitter, tx, stopped));
        debug!(?interval, "ticker started");

        Self { interval, rx, stop }
    }

    /// Nominal interval, before jitter
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stop the ticker. Safe to call any number of times, from any thread.
    ///
    /// Does not wait for the loop to exit; [`Ticker::recv`] returning `None`
    /// marks that.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Whether stop has been requested
    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    /// Handle for stopping this ticker from elsewhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Wait for the next tick.
    ///
    /// Returns `None` once the ticker has stopped and its loop has exited.
    /// A tick still pending when stop was requested is discarded.
    pub async fn recv(&mut self) -> Option<Tick> {
        loop {
            let tick = self.rx.recv().await?;
            if !self.is_stopped() {
                return Some(tick);
            }
            trace!(seq = tick.seq, "discarding tick pending at stop");
        }
    }

    /// Take the pending tick, if any, without waiting.
    pub fn try_recv(&mut self) -> Result<Tick, TryRecvError> {
        loop {
            let tick = self.rx.try_recv()?;
            if !self.is_stopped() {
                return Ok(tick);
            }
            trace!(seq = tick.seq, "discarding tick pending at stop");
        }
    }
}

impl Stream for Ticker {
    type Item = Tick;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Tick>> {
        let this = self.get_mut();
        loop {
            match ready!(this.rx.poll_recv(cx)) {
                Some(tick) if this.is_stopped() => {
                    trace!(seq = tick.seq, "discarding tick pending at stop");
                }
                next => return Poll::Ready(next),
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop.stop();
    }
}

/// The scheduling loop. Owns the jitter strategy and the sending half of the
/// output channel; dropping `tx` on return is what closes the stream.
async fn run<J: Jitter>(
    interval: Duration,
    mut jitter: J,
    tx: mpsc::Sender<Tick>,
    mut stopped: watch::Receiver<bool>,
) {
    let mut seq = 0u64;

    loop {
        let stop_requested = *stopped.borrow_and_update();
        if stop_requested {
            break;
        }

        let delay = jitter.jitter(interval);
        trace!(?delay, "waiting for next tick");

        // Err means every stop handle is gone, which also ends the loop
        tokio::select! {
            biased;
            _ = stopped.changed() => break,
            _ = time::sleep(delay) => {}
        }

        seq += 1;
        let stop_requested = *stopped.borrow();
        if stop_requested {
            break;
        }

        match tx.try_send(Tick::now(seq)) {
            Ok(()) => trace!(seq, "tick published"),
            Err(TrySendError::Full(_)) => trace!(seq, "consumer not ready, tick dropped"),
            Err(TrySendError::Closed(_)) => {
                debug!(seq, "tick receiver dropped");
                break;
            }
        }
    }

    debug!(ticks = seq, "ticker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::{NoJitter, from_fn};

    #[tokio::test(start_paused = true)]
    async fn test_new_sets_interval() {
        let ticker = Ticker::new(Duration::from_millis(100), NoJitter);
        assert_eq!(ticker.interval(), Duration::from_millis(100));
        assert!(!ticker.is_stopped());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_arrive_after_jittered_delay() {
        let interval = Duration::from_millis(50);
        let start = time::Instant::now();
        let mut ticker = Ticker::new(interval, from_fn(|d| d + Duration::from_millis(10)));

        let tick = ticker.recv().await.unwrap();
        assert_eq!(tick.seq, 1);
        let elapsed = tick.instant - start;
        assert!(elapsed >= Duration::from_millis(60), "ticked early: {:?}", elapsed);
        assert!(elapsed < Duration::from_millis(61), "ticked late: {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_closes_stream() {
        let mut ticker = Ticker::new(Duration::from_millis(10), NoJitter);
        ticker.stop();
        assert!(ticker.is_stopped());
        assert!(ticker.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_tick_discarded_after_stop() {
        let mut ticker = Ticker::new(Duration::from_millis(10), NoJitter);
        time::sleep(Duration::from_millis(15)).await;

        ticker.stop();
        assert!(ticker.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_try_recv_empty_before_first_tick() {
        let mut ticker = Ticker::new(Duration::from_secs(1), NoJitter);
        assert_eq!(ticker.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_ticks_immediately() {
        let mut ticker = Ticker::new(Duration::from_secs(60), from_fn(|_| Duration::ZERO));
        let start = time::Instant::now();
        let tick = ticker.recv().await.unwrap();
        assert_eq!(tick.instant, start);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_yields_ticks() {
        use futures::StreamExt;

        let ticker = Ticker::new(Duration::from_millis(5), NoJitter);
        let seqs: Vec<u64> = ticker.take(3).map(|t| t.seq).collect().await;
        assert_eq!(seqs, vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_ends_after_stop() {
        use futures::StreamExt;

        let mut ticker = Ticker::new(Duration::from_millis(5), NoJitter);
        assert!(ticker.next().await.is_some());
        ticker.stop();
        assert!(ticker.next().await.is_none());
    }
}
