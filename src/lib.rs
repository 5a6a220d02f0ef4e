//! # taskpulse
//!
//! **Taskpulse** runs one async task on a fixed interval with a single-flight
//! guarantee: two runs of the same task never overlap, every run is bounded by
//! a timeout, and a tick that arrives while a run is still active is resolved
//! by an explicit [`OverrunPolicy`].
//!
//! It is meant for the small recurring chores of a long-lived process (liveness
//! pings, quota polling) where a stalled remote call must degrade to a late or
//! background-orphaned run instead of piling up or blocking later work.
//!
//! ## Architecture
//! ```text
//!   Scheduler::start ──► interval timer ──tick()──► Coordinator (Mutex<RunState>)
//!                                                     │
//!                         lock free ──► begin run ────┤
//!                         lock held ──► OverrunPolicy │
//!                                                     ▼
//!                                        runner (tokio task per run)
//!                                          ├─ spawn task.run(token)
//!                                          ├─ timeout ─► cancel token (TimeoutHit)
//!                                          └─ grace::watch ─► Settled | Expired
//!                                                     │
//!                                                     ▼
//!                                  Coordinator::settle ─► classify, free lock,
//!                                                         rerun if AbandonAndRun
//!
//!   every step ── publish(Event) ──► Bus ─┬─► tracing (always)
//!                                          ├─► Scheduler::subscribe() receivers
//!                                          └─► Subscribe workers (custom handlers)
//! ```
//!
//! ## Cancellation is advisory
//! The scheduler never kills a task body. It cancels the run's
//! [`CancellationToken`](tokio_util::sync::CancellationToken) and grants
//! [`SchedulerConfig::grace`] for the body to return. A body that ignores the
//! token is reported as [`EventKind::NonGracefulAbandon`] and left running in
//! the background, untracked, until it finishes on its own (possibly never).
//!
//! ## Events
//! Every event is written through `tracing` (target `taskpulse`) when it is
//! published; install any `tracing` subscriber to see them.
//!
//! | Kind                   | Level | When                                              |
//! |------------------------|-------|---------------------------------------------------|
//! | `TimeoutHit`           | error | a run exceeded `timeout` (even if it finishes later) |
//! | `OverrunAbandoned`     | warn  | a tick cancelled the active run (`AbandonAndRun`) |
//! | `NonGracefulAbandon`   | error | an aborted run outlived its grace period          |
//! | `TaskFailed`           | error | the task body returned an error or panicked       |
//! | lifecycle kinds        | info/debug | start, stop, run starting/completed/skipped  |
//!
//! Stopping or disposing never produces an abnormal event.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use taskpulse::{OverrunPolicy, Scheduler, SchedulerConfig, StartMode, TaskError, TaskFn, TaskRef};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let heartbeat: TaskRef = TaskFn::arc("heartbeat", |ctx: CancellationToken| async move {
//!         if ctx.is_cancelled() {
//!             return Err(TaskError::Canceled);
//!         }
//!         // send the ping...
//!         Ok(())
//!     });
//!
//!     let cfg = SchedulerConfig::new(
//!         Duration::from_secs(60),
//!         Duration::from_secs(10),
//!         Duration::from_secs(2),
//!     );
//!     let scheduler = Scheduler::new(cfg, heartbeat, OverrunPolicy::AbandonAndRun)?;
//!
//!     scheduler.start(StartMode::Immediately);
//!     // ... later
//!     scheduler.dispose();
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod policies;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use config::SchedulerConfig;
pub use self::core::{Scheduler, SchedulerBuilder};
pub use error::{AbortReason, SchedulerError, TaskError};
pub use events::{Event, EventKind};
pub use policies::{OverrunPolicy, StartMode};
pub use subscribers::Subscribe;
pub use tasks::{Task, TaskFn, TaskRef};
