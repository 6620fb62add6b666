//! Jitterbug - tickers with pluggable jitter
//!
//! A [`Ticker`] ticks at roughly its nominal interval, with each delay chosen by a
//! [`Jitter`] strategy so that many timers started together drift apart instead of
//! firing in lockstep.

pub mod config;
pub mod error;
pub mod jitter;
pub mod ticker;

pub use error::{JitterbugError, Result};
pub use jitter::Jitter;
pub use ticker::{StopHandle, Tick, Ticker};
