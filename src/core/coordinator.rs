//! # Coordinator: single-flight lock and run classification.
//!
//! The coordinator owns the only mutable scheduling state: the active run (the
//! lock), its abort reason, and whether an overrun asked for a rerun. Every
//! mutation goes through one `Mutex`, so ticks, timeouts and settlements are
//! serialized no matter which tokio worker they arrive on.
//!
//! ## Entry points
//! ```text
//! arm()                  ── Scheduler::start, before the first tick
//!
//! tick()                 ── interval timer / Scheduler::start(Immediately)
//!   ├─ not armed          → ignored (stop/dispose already released)
//!   ├─ lock free          → begin_run()
//!   └─ lock held
//!        ├─ AllowToComplete → RunSkipped
//!        └─ AbandonAndRun   → abort(Overrun) + rerun_pending
//!
//! time_out(run)          ── runner, when the timeout elapses first
//!   └─ abort(Timeout) → TimeoutHit (only if no earlier abort)
//!
//! settle(run, outcome)   ── runner, once the run settled or its grace expired
//!   ├─ run no longer current → ignored (released by stop/dispose)
//!   ├─ classify → RunCompleted | TaskFailed | NonGracefulAbandon
//!   └─ rerun_pending → begin_run() immediately
//!
//! release()              ── Scheduler::stop / dispose
//!   └─ disarm, drop the lock, abort(Disposed), forget rerun
//! ```
//!
//! ## Rules
//! - At most one run is current; a new run is only begun with the lock free.
//! - No run begins between `release()` and the next `arm()`, even if the
//!   interval loop delivers a tick after it was cancelled.
//! - A run's token is cancelled at most once; the first [`AbortReason`] sticks.
//! - Nothing here awaits: all waiting happens in the runner task.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::grace::GraceOutcome;
use super::runner::{self, RunOutcome};
use crate::{
    config::SchedulerConfig,
    error::{AbortReason, TaskError},
    events::{Bus, Event, EventKind},
    policies::OverrunPolicy,
    tasks::TaskRef,
};

/// The run currently holding the lock.
struct ActiveRun {
    id: u64,
    token: CancellationToken,
    reason: Option<AbortReason>,
}

impl ActiveRun {
    /// Cancels the run's token unless it was already aborted.
    ///
    /// Returns `true` if `reason` became the abort reason.
    fn abort(&mut self, reason: AbortReason) -> bool {
        if self.reason.is_some() {
            return false;
        }
        self.reason = Some(reason);
        self.token.cancel();
        true
    }
}

#[derive(Default)]
struct RunState {
    armed: bool,
    current: Option<ActiveRun>,
    rerun_pending: bool,
    next_id: u64,
}

/// Serializes ticks, timeouts and settlements for one task.
pub(crate) struct Coordinator {
    task: TaskRef,
    cfg: SchedulerConfig,
    policy: OverrunPolicy,
    bus: Bus,
    state: Mutex<RunState>,
}

impl Coordinator {
    pub(crate) fn new(
        task: TaskRef,
        cfg: SchedulerConfig,
        policy: OverrunPolicy,
        bus: Bus,
    ) -> Arc<Self> {
        Arc::new(Self {
            task,
            cfg,
            policy,
            bus,
            state: Mutex::new(RunState::default()),
        })
    }

    pub(crate) fn task(&self) -> &TaskRef {
        &self.task
    }

    pub(crate) fn config(&self) -> &SchedulerConfig {
        &self.cfg
    }

    pub(crate) fn policy(&self) -> OverrunPolicy {
        self.policy
    }

    pub(crate) fn bus(&self) -> &Bus {
        &self.bus
    }

    /// True while a run holds the lock.
    pub(crate) fn is_running(&self) -> bool {
        self.lock().current.is_some()
    }

    /// Allows ticks to begin runs until the next [`release`](Self::release).
    pub(crate) fn arm(&self) {
        self.lock().armed = true;
    }

    /// Handles one interval tick.
    ///
    /// Must be called from within a Tokio runtime (a run may be spawned).
    pub(crate) fn tick(self: &Arc<Self>) {
        let mut state = self.lock();
        if !state.armed {
            return;
        }

        let Some(active) = state.current.as_mut() else {
            self.begin_run(&mut state);
            return;
        };

        match self.policy {
            OverrunPolicy::AllowToComplete => {
                self.publish(Event::new(EventKind::RunSkipped).with_run(active.id));
            }
            OverrunPolicy::AbandonAndRun => {
                if active.abort(AbortReason::Overrun) {
                    self.publish(
                        Event::new(EventKind::OverrunAbandoned)
                            .with_run(active.id)
                            .with_reason(AbortReason::Overrun.to_string()),
                    );
                }
                state.rerun_pending = true;
            }
        }
    }

    /// Aborts `run` because it exceeded `timeout`.
    pub(crate) fn time_out(&self, run: u64, timeout: Duration) {
        let mut state = self.lock();
        let Some(active) = state.current.as_mut().filter(|a| a.id == run) else {
            return;
        };

        let reason = AbortReason::Timeout { timeout };
        if active.abort(reason) {
            self.publish(
                Event::new(EventKind::TimeoutHit)
                    .with_run(run)
                    .with_timeout(timeout)
                    .with_reason(reason.to_string()),
            );
        }
    }

    /// Records the outcome of `run` and frees the lock.
    ///
    /// Outcomes of runs already released by [`release`](Self::release) are
    /// dropped without being reported.
    pub(crate) fn settle(self: &Arc<Self>, run: u64, outcome: RunOutcome) {
        let mut state = self.lock();
        let Some(active) = state.current.take_if(|a| a.id == run) else {
            return;
        };

        self.report(&active, outcome);

        if std::mem::take(&mut state.rerun_pending) {
            self.begin_run(&mut state);
        }
    }

    /// Disarms ticks and frees the lock, aborting the active run.
    ///
    /// Returns `true` if a run was active.
    pub(crate) fn release(&self) -> bool {
        let mut state = self.lock();
        state.armed = false;
        state.rerun_pending = false;
        match state.current.take() {
            Some(mut active) => {
                active.abort(AbortReason::Disposed);
                true
            }
            None => false,
        }
    }

    fn begin_run(self: &Arc<Self>, state: &mut RunState) {
        state.next_id += 1;
        let id = state.next_id;
        let token = CancellationToken::new();

        state.current = Some(ActiveRun {
            id,
            token: token.clone(),
            reason: None,
        });
        self.publish(Event::new(EventKind::RunStarting).with_run(id));

        tokio::spawn(runner::run_once(Arc::clone(self), id, token));
    }

    fn report(&self, active: &ActiveRun, outcome: RunOutcome) {
        let ev = match outcome {
            GraceOutcome::Settled(Ok(Ok(()))) => Event::new(EventKind::RunCompleted),
            GraceOutcome::Settled(Ok(Err(TaskError::Canceled))) if active.reason.is_some() => {
                Event::new(EventKind::RunCompleted)
            }
            GraceOutcome::Settled(Ok(Err(e))) => {
                Event::new(EventKind::TaskFailed).with_reason(e.to_string())
            }
            GraceOutcome::Settled(Err(join)) => {
                Event::new(EventKind::TaskFailed).with_reason(join.to_string())
            }
            GraceOutcome::Expired => {
                Event::new(EventKind::NonGracefulAbandon).with_grace(self.cfg.grace)
            }
        };

        let ev = match (ev.reason.is_none(), active.reason) {
            (true, Some(reason)) => ev.with_reason(reason.to_string()),
            _ => ev,
        };
        self.publish(ev.with_run(active.id));
    }

    fn publish(&self, ev: Event) {
        self.bus.publish(ev.with_task(self.task.name()));
    }

    fn lock(&self) -> MutexGuard<'_, RunState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
