//! # Task abstraction.
//!
//! This module defines the [`Task`] trait (async, cancelable) and the shared
//! handle type [`TaskRef`].
//!
//! A task receives a [`CancellationToken`] on every run. Cancellation is
//! advisory: the scheduler never stops a task body by force, it only fires the
//! token and waits up to its grace period for the body to return.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// Shared handle to a task.
pub type TaskRef = Arc<dyn Task>;

/// # Asynchronous, cancelable unit of periodic work.
///
/// A `Task` has a stable [`name`](Task::name) and an async [`run`](Task::run)
/// method that receives a fresh [`CancellationToken`] per run.
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use async_trait::async_trait;
/// use taskpulse::{Task, TaskError};
///
/// struct Ping;
///
/// #[async_trait]
/// impl Task for Ping {
///     fn name(&self) -> &str { "ping" }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError> {
///         if ctx.is_cancelled() {
///             return Err(TaskError::Canceled);
///         }
///         // send the ping...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Executes one run of the task.
    ///
    /// Implementations should watch `ctx` and return promptly once it fires;
    /// returning [`TaskError::Canceled`] at that point counts as a clean exit.
    async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError>;
}
