//! # Events emitted by the scheduler.
//!
//! The [`EventKind`] enum classifies event types across two categories:
//! - **Lifecycle events**: start/stop and normal run flow (starting, completed, skipped)
//! - **Abnormal events**: one per abnormal run termination (timeout, overrun,
//!   non-graceful abandonment, task failure)
//!
//! The [`Event`] struct carries additional metadata such as timestamps, task name,
//! run id, reasons and durations.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use taskpulse::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TimeoutHit)
//!     .with_task("ping")
//!     .with_run(3)
//!     .with_timeout(Duration::from_secs(5));
//!
//! assert_eq!(ev.kind, EventKind::TimeoutHit);
//! assert_eq!(ev.task.as_deref(), Some("ping"));
//! assert_eq!(ev.timeout_ms, Some(5000));
//! assert!(ev.is_abnormal());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of scheduler events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Lifecycle events ===
    /// Interval timer armed by `start`.
    ///
    /// Sets: `task`, `at`, `seq`
    SchedulerStarted,

    /// Interval timer cleared by `stop` or `dispose`.
    ///
    /// Sets: `task`, `reason` (`stopped` or `disposed`), `at`, `seq`
    SchedulerStopped,

    /// A run acquired the lock and its task body is being invoked.
    ///
    /// Sets: `task`, `run`, `at`, `seq`
    RunStarting,

    /// A run settled without error (or returned `Canceled` after being aborted).
    ///
    /// Sets: `task`, `run`, `reason` (abort reason, if the run was aborted), `at`, `seq`
    RunCompleted,

    /// A tick was dropped because a run is active (`AllowToComplete`).
    ///
    /// Sets: `task`, `run` (active run), `at`, `seq`
    RunSkipped,

    // === Abnormal terminations ===
    /// A run exceeded its timeout and was cancelled.
    ///
    /// Sets: `task`, `run`, `timeout_ms`, `reason`, `at`, `seq`
    TimeoutHit,

    /// A run was cancelled because a new interval fired (`AbandonAndRun`).
    ///
    /// Sets: `task`, `run`, `reason`, `at`, `seq`
    OverrunAbandoned,

    /// An aborted run did not return within the grace period and was detached.
    ///
    /// Sets: `task`, `run`, `grace_ms`, `reason` (abort reason), `at`, `seq`
    NonGracefulAbandon,

    /// The task body returned an error or panicked.
    ///
    /// Sets: `task`, `run`, `reason` (error message), `at`, `seq`
    TaskFailed,
}

/// Scheduler event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Name of the task.
    pub task: Option<Arc<str>>,
    /// Run id (starting from 1, per scheduler).
    pub run: Option<u64>,
    /// Task timeout in milliseconds (compact).
    pub timeout_ms: Option<u32>,
    /// Grace period in milliseconds (compact).
    pub grace_ms: Option<u32>,
    /// Human-readable reason (errors, abort causes).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            run: None,
            timeout_ms: None,
            grace_ms: None,
            reason: None,
        }
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a task name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches a run id.
    #[inline]
    pub fn with_run(mut self, run: u64) -> Self {
        self.run = Some(run);
        self
    }

    /// Attaches a timeout duration (stored as milliseconds).
    #[inline]
    pub fn with_timeout(mut self, d: Duration) -> Self {
        self.timeout_ms = Some(compact_ms(d));
        self
    }

    /// Attaches a grace duration (stored as milliseconds).
    #[inline]
    pub fn with_grace(mut self, d: Duration) -> Self {
        self.grace_ms = Some(compact_ms(d));
        self
    }

    /// True for kinds that report an abnormal run termination.
    #[inline]
    pub fn is_abnormal(&self) -> bool {
        matches!(
            self.kind,
            EventKind::TimeoutHit
                | EventKind::OverrunAbandoned
                | EventKind::NonGracefulAbandon
                | EventKind::TaskFailed
        )
    }
}

fn compact_ms(d: Duration) -> u32 {
    d.as_millis().min(u128::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::RunStarting);
        let b = Event::new(EventKind::RunStarting);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_durations_saturate() {
        let ev = Event::new(EventKind::NonGracefulAbandon).with_grace(Duration::MAX);
        assert_eq!(ev.grace_ms, Some(u32::MAX));
    }

    #[test]
    fn test_abnormal_kinds() {
        assert!(Event::new(EventKind::OverrunAbandoned).is_abnormal());
        assert!(Event::new(EventKind::TaskFailed).is_abnormal());
        assert!(!Event::new(EventKind::RunSkipped).is_abnormal());
        assert!(!Event::new(EventKind::RunCompleted).is_abnormal());
    }
}
