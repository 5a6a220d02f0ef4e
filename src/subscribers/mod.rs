//! # Event subscribers.
//!
//! [`Subscribe`] is the extension point for custom event handlers. Handlers are
//! attached with [`SchedulerBuilder::with_subscribers`](crate::SchedulerBuilder)
//! and each one is driven by its own worker over its own bus receiver.

mod subscribe;
mod worker;

pub use subscribe::Subscribe;
pub(crate) use worker::spawn_workers;
