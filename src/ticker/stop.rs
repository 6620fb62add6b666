//! Cancellation signal shared between a ticker, its stop handles and its loop.

use std::sync::Arc;

use tokio::sync::watch;

/// Cloneable handle that stops a [`Ticker`](super::Ticker).
///
/// Any number of handles may call [`StopHandle::stop`] concurrently; the
/// running to stopped transition happens once.
#[derive(Debug, Clone)]
pub struct StopHandle {
    cancel: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    /// Create the signal, returning the handle and the receiver the loop waits on.
    pub(crate) fn channel() -> (Self, watch::Receiver<bool>) {
        let (cancel, stopped) = watch::channel(false);
        (
            Self {
                cancel: Arc::new(cancel),
            },
            stopped,
        )
    }

    /// Signal the ticker to stop. Never blocks.
    ///
    /// Returns true only for the call that performed the transition.
    pub fn stop(&self) -> bool {
        // Runs before receivers are notified, so the log precedes the loop's exit
        self.cancel.send_if_modified(|stopped| {
            if *stopped {
                false
            } else {
                tracing::debug!("ticker stop requested");
                *stopped = true;
                true
            }
        })
    }

    /// Whether stop has been requested
    pub fn is_stopped(&self) -> bool {
        *self.cancel.borrow()
    }
}
