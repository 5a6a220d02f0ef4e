//! Runtime core: single-flight scheduling.
//!
//! The only public API from this module is [`Scheduler`] (and its builder).
//!
//! Internal modules:
//! - [`scheduler`]: interval timer and start/stop/dispose surface;
//! - [`coordinator`]: single-flight lock, overrun policy, outcome classification;
//! - [`runner`]: executes one run with timeout supervision;
//! - [`grace`]: races an aborted run against its grace period;
//! - [`builder`]: validates config and wires subscribers.

mod builder;
mod coordinator;
mod grace;
mod runner;
mod scheduler;

pub use builder::SchedulerBuilder;
pub use scheduler::Scheduler;
