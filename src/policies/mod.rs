//! Scheduling policies.
//!
//! This module groups the knobs that control **what happens** when a tick
//! arrives and **when** the first tick fires.
//!
//! ## Contents
//! - [`OverrunPolicy`] what to do with a tick that arrives while a run is active
//! - [`StartMode`] whether `start` fires a tick immediately or waits one interval
//!
//! ## Defaults
//! - `OverrunPolicy::AllowToComplete` (never interrupts a run).
//! - `StartMode::Scheduled` (first tick after one full interval).

mod overrun;
mod start;

pub use overrun::OverrunPolicy;
pub use start::StartMode;
