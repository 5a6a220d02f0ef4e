//! Scheduler events: types, logging and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - `Bus` logs each event through `tracing`, then broadcasts it
//!
//! ## Quick reference
//! - **Publishers**: `Scheduler` (start/stop), `Coordinator` (runs, overruns,
//!   timeouts, settlement).
//! - **Consumers**: the `tracing` subscriber installed by the application,
//!   `Scheduler::subscribe()` receivers and attached `Subscribe` workers.

mod bus;
mod event;
mod log;

pub(crate) use bus::Bus;
pub use event::{Event, EventKind};
