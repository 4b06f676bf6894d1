//! Environment abstraction for deterministic testing.
//!
//! Decouples launcher logic from system resources (monotonic time, wall-clock
//! time, timers). Tests run against tokio's paused clock or a fixed wall
//! clock; production uses [`SystemEnv`].

use std::{
    future::Future,
    ops::{Add, Sub},
    time::Duration,
};

use chrono::{Local, NaiveDateTime, Utc};

/// Abstract environment providing time and async sleeping.
///
/// Implementations MUST guarantee that `now()` never goes backwards.
pub trait Environment: Clone + Send + Sync + 'static {
    /// The monotonic instant type used by this environment.
    type Instant: Copy
        + Ord
        + Send
        + Sync
        + Sub<Output = Duration>
        + Add<Duration, Output = Self::Instant>;

    /// Current monotonic time.
    ///
    /// # Invariants
    ///
    /// - Subsequent calls return values `>=` previous calls.
    fn now(&self) -> Self::Instant;

    /// Sleeps for the specified duration.
    ///
    /// Only driver-level code (bridge timeouts, runtime timers) awaits this;
    /// state machines never do.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;

    /// Local wall-clock time, used for `HH:MM` alarm matching and the clock.
    fn local_time(&self) -> NaiveDateTime;

    /// Milliseconds since the Unix epoch, used to mint request ids.
    fn unix_millis(&self) -> u64;
}

/// Production environment backed by tokio timers and the system clock.
///
/// Timers go through tokio, so tests that pause tokio's clock also control
/// bridge timeouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = tokio::time::Instant;

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }

    fn local_time(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn unix_millis(&self) -> u64 {
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }
}
