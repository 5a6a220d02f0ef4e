//! # Event logging.
//!
//! Every event published on the [`Bus`](super::Bus) is written through
//! `tracing` before it is broadcast, so abnormal terminations reach the logs
//! whether or not anything subscribed to the bus.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! ERROR taskpulse: task timed out task="ping" run=1 timeout_ms=100
//! WARN  taskpulse: run abandoned for a new run task="ping" run=2
//! ERROR taskpulse: run did not complete within the grace period task="ping" run=2 grace_ms=10 reason="abandoned for a new run"
//! ERROR taskpulse: unhandled task error task="ping" run=3 reason="execution failed: 503"
//! ```

use tracing::{debug, error, info, warn};

use super::event::{Event, EventKind};

/// Writes `e` through `tracing`: abnormal kinds at `warn`/`error`, lifecycle kinds at `info`/`debug`.
pub(crate) fn record(e: &Event) {
    let task = e.task.as_deref().unwrap_or("unknown");
    let reason = e.reason.as_deref().unwrap_or("");
    match e.kind {
        EventKind::SchedulerStarted => {
            info!(target: "taskpulse", task, "scheduler started");
        }
        EventKind::SchedulerStopped => {
            info!(target: "taskpulse", task, reason, "scheduler stopped");
        }
        EventKind::RunStarting => {
            debug!(target: "taskpulse", task, run = e.run, "run starting");
        }
        EventKind::RunCompleted => {
            debug!(target: "taskpulse", task, run = e.run, reason, "run completed");
        }
        EventKind::RunSkipped => {
            debug!(target: "taskpulse", task, run = e.run, "tick skipped, run still active");
        }
        EventKind::TimeoutHit => {
            error!(
                target: "taskpulse",
                task,
                run = e.run,
                timeout_ms = e.timeout_ms,
                "task timed out"
            );
        }
        EventKind::OverrunAbandoned => {
            warn!(target: "taskpulse", task, run = e.run, "run abandoned for a new run");
        }
        EventKind::NonGracefulAbandon => {
            error!(
                target: "taskpulse",
                task,
                run = e.run,
                grace_ms = e.grace_ms,
                reason,
                "run did not complete within the grace period"
            );
        }
        EventKind::TaskFailed => {
            error!(target: "taskpulse", task, run = e.run, reason, "unhandled task error");
        }
    }
}
