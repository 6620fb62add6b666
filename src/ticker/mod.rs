//! Jittered ticker
//!
//! [`Ticker`] runs a background loop that waits `jitter(interval)` between
//! ticks and publishes each tick without ever blocking on the consumer.

mod engine;
mod stop;
mod tick;

pub use engine::Ticker;
pub use stop::StopHandle;
pub use tick::Tick;
