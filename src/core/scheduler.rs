//! # Scheduler: interval timer and public lifecycle.
//!
//! The [`Scheduler`] owns the repeating timer and exposes `start`/`stop`/`dispose`.
//! Every timer tick is forwarded to the coordinator, which decides whether a run
//! begins, is skipped, or abandons the active one.
//!
//! ## Lifecycle
//! ```text
//!            start(mode)                 stop()
//!   Idle ───────────────► Armed ───────────────► Idle   (start again → fresh interval)
//!    │                      │
//!    │ dispose()            │ dispose()
//!    ▼                      ▼
//!   Disposed (permanently inert; start() is a no-op)
//! ```
//!
//! ## Rules
//! - `start` is idempotent while armed; with [`StartMode::Immediately`] it
//!   ticks once synchronously before arming the timer.
//! - After `stop`/`dispose` returns no run begins, even from a timer tick
//!   that was already being delivered.
//! - `stop` never waits: the active run is aborted with
//!   [`AbortReason::Disposed`](crate::AbortReason) and forgotten; whatever it
//!   does afterwards is not reported.
//! - A failing run never stops the timer; every interval is an independent attempt.
//! - Dropping the scheduler disposes it.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use taskpulse::{OverrunPolicy, Scheduler, SchedulerConfig, StartMode, TaskError, TaskFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ping = TaskFn::arc("ping", |ctx: CancellationToken| async move {
//!         tokio::select! {
//!             _ = ctx.cancelled() => Err(TaskError::Canceled),
//!             _ = tokio::time::sleep(Duration::from_millis(5)) => Ok(()),
//!         }
//!     });
//!
//!     let cfg = SchedulerConfig::new(
//!         Duration::from_secs(30),
//!         Duration::from_secs(10),
//!         Duration::from_secs(1),
//!     );
//!     let scheduler = Scheduler::new(cfg, ping, OverrunPolicy::AllowToComplete)?;
//!
//!     scheduler.start(StartMode::Immediately);
//!     assert!(scheduler.is_armed());
//!     scheduler.dispose();
//!     assert!(scheduler.is_disposed());
//!     Ok(())
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::builder::SchedulerBuilder;
use super::coordinator::Coordinator;
use crate::{
    config::SchedulerConfig,
    error::SchedulerError,
    events::{Event, EventKind},
    policies::{OverrunPolicy, StartMode},
    tasks::TaskRef,
};

/// Single-flight periodic runner for one task.
pub struct Scheduler {
    coord: Arc<Coordinator>,
    /// Cancels the interval loop; `Some` while armed.
    timer: Mutex<Option<CancellationToken>>,
    disposed: AtomicBool,
}

impl Scheduler {
    /// Returns a builder for a scheduler running `task` with `cfg`.
    pub fn builder(cfg: SchedulerConfig, task: TaskRef) -> SchedulerBuilder {
        SchedulerBuilder::new(cfg, task)
    }

    /// Creates a scheduler without subscribers.
    ///
    /// Fails if `cfg` is invalid (see [`SchedulerConfig::validate`]).
    pub fn new(
        cfg: SchedulerConfig,
        task: TaskRef,
        policy: OverrunPolicy,
    ) -> Result<Self, SchedulerError> {
        SchedulerBuilder::new(cfg, task).overrun(policy).build()
    }

    pub(crate) fn from_coordinator(coord: Arc<Coordinator>) -> Self {
        Self {
            coord,
            timer: Mutex::new(None),
            disposed: AtomicBool::new(false),
        }
    }

    /// Arms the interval timer.
    ///
    /// No-op if already armed or disposed. Must be called from within a Tokio
    /// runtime.
    pub fn start(&self, mode: StartMode) {
        if self.is_disposed() {
            return;
        }
        let mut timer = self.lock_timer();
        if timer.is_some() {
            return;
        }

        let period = self.coord.config().interval;
        let first = Instant::now() + period;
        self.coord
            .bus()
            .publish(Event::new(EventKind::SchedulerStarted).with_task(self.task_name()));

        self.coord.arm();
        if mode == StartMode::Immediately {
            self.coord.tick();
        }

        let token = CancellationToken::new();
        tokio::spawn(drive_interval(
            Arc::clone(&self.coord),
            first,
            period,
            token.clone(),
        ));
        *timer = Some(token);
    }

    /// Clears the timer and aborts the active run without waiting for it.
    ///
    /// The scheduler can be started again afterwards.
    pub fn stop(&self) {
        self.halt("stopped");
    }

    /// Stops the scheduler permanently.
    ///
    /// Idempotent. A disposed scheduler ignores `start`; build a new one instead.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.halt("disposed");
    }

    /// Creates a receiver for events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.coord.bus().subscribe()
    }

    /// True while the interval timer is armed.
    pub fn is_armed(&self) -> bool {
        self.lock_timer().is_some()
    }

    /// True while a run holds the single-flight lock.
    pub fn is_running(&self) -> bool {
        self.coord.is_running()
    }

    /// True once [`dispose`](Self::dispose) was called (or the scheduler dropped).
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Name of the scheduled task.
    pub fn task_name(&self) -> &str {
        self.coord.task().name()
    }

    /// Timing configuration.
    pub fn config(&self) -> &SchedulerConfig {
        self.coord.config()
    }

    /// Overrun policy.
    pub fn policy(&self) -> OverrunPolicy {
        self.coord.policy()
    }

    fn halt(&self, reason: &'static str) {
        let armed = match self.lock_timer().take() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        };
        let released = self.coord.release();

        if armed || released {
            self.coord.bus().publish(
                Event::new(EventKind::SchedulerStopped)
                    .with_task(self.task_name())
                    .with_reason(reason),
            );
        }
    }

    fn lock_timer(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.timer.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Ticks the coordinator every `period`, starting at `first`, until cancelled.
async fn drive_interval(
    coord: Arc<Coordinator>,
    first: Instant,
    period: Duration,
    token: CancellationToken,
) {
    let mut ticker = time::interval_at(first, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => coord.tick(),
        }
    }
}
