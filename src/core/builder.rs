use std::sync::Arc;

use super::{coordinator::Coordinator, scheduler::Scheduler};
use crate::{
    config::SchedulerConfig,
    error::SchedulerError,
    events::Bus,
    policies::OverrunPolicy,
    subscribers::{self, Subscribe},
    tasks::TaskRef,
};

/// Builder for constructing a [`Scheduler`] with optional features.
pub struct SchedulerBuilder {
    cfg: SchedulerConfig,
    task: TaskRef,
    policy: OverrunPolicy,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl SchedulerBuilder {
    /// Creates a new builder for `task` with the given configuration.
    pub fn new(cfg: SchedulerConfig, task: TaskRef) -> Self {
        Self {
            cfg,
            task,
            policy: OverrunPolicy::default(),
            subscribers: Vec::new(),
        }
    }

    /// Sets the policy applied when a tick arrives during an active run.
    pub fn overrun(mut self, policy: OverrunPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attaches custom event handlers.
    ///
    /// Not needed for logging. Attaching any requires building inside a Tokio
    /// runtime.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Validates the configuration and builds the scheduler.
    ///
    /// The scheduler starts idle; call [`Scheduler::start`] to arm it.
    pub fn build(self) -> Result<Scheduler, SchedulerError> {
        self.cfg.validate()?;

        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        subscribers::spawn_workers(&bus, self.subscribers);

        let coord = Coordinator::new(self.task, self.cfg, self.policy, bus);
        Ok(Scheduler::from_coordinator(coord))
    }
}
