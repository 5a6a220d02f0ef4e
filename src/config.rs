//! # Scheduler configuration.
//!
//! Provides [`SchedulerConfig`], the timing settings of one scheduler instance.
//! The config is copied into the scheduler at construction and never changes
//! afterwards.
//!
//! ## Sentinel values
//! - `timeout = 0s` → every run times out on the first timer pass after it begins
//! - `grace = 0s` → an aborted run must already be settled when the abort is observed
//! - `interval = 0s` → rejected by [`SchedulerConfig::validate`]

use std::time::Duration;

use crate::error::SchedulerError;

/// Timing configuration for a [`Scheduler`](crate::Scheduler).
///
/// ## Field semantics
/// - `interval`: Period between ticks (must be `> 0`)
/// - `timeout`: Maximum duration of a single run (every run is bounded)
/// - `grace`: How long an aborted run may keep going before it is abandoned
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Period of the repeating timer.
    pub interval: Duration,

    /// Per-run timeout.
    ///
    /// On expiry the run's token is cancelled with [`AbortReason::Timeout`](crate::AbortReason)
    /// and a `TimeoutHit` event is published, even if the run completes later.
    pub timeout: Duration,

    /// Window granted to an aborted run to observe cancellation and return.
    ///
    /// A run that is still going when it elapses is detached and keeps running
    /// in the background, untracked.
    pub grace: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    pub bus_capacity: usize,
}

impl SchedulerConfig {
    /// Creates a config with the given timings and the default bus capacity.
    pub fn new(interval: Duration, timeout: Duration, grace: Duration) -> Self {
        Self {
            interval,
            timeout,
            grace,
            ..Self::default()
        }
    }

    /// Checks that the config can drive a repeating timer.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.interval.is_zero() {
            return Err(SchedulerError::InvalidConfig {
                field: "interval",
                problem: "must be non-zero",
            });
        }
        Ok(())
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for SchedulerConfig {
    /// Default configuration:
    ///
    /// - `interval = 60s`
    /// - `timeout = 30s`
    /// - `grace = 5s`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            timeout: Duration::from_secs(30),
            grace: Duration::from_secs(5),
            bus_capacity: 1024,
        }
    }
}
