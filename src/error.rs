//! Error types used by the scheduler and by scheduled tasks.
//!
//! This module defines three enums:
//!
//! - [`SchedulerError`]: errors raised while constructing a scheduler.
//! - [`TaskError`]: errors returned by a task body.
//! - [`AbortReason`]: why an in-flight run had its cancellation token fired.
//!
//! Only [`SchedulerError`] is ever returned to a caller. Task errors and abort
//! reasons are classified by the scheduler and published as event reasons.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced while building a scheduler.
///
/// Construction is the only place the scheduler fails fast; once built, every
/// failure is reported through events instead.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// A configuration value is out of range.
    #[error("invalid scheduler config: {field} {problem}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        problem: &'static str,
    },
}

impl SchedulerError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use taskpulse::SchedulerError;
    ///
    /// let err = SchedulerError::InvalidConfig { field: "interval", problem: "must be non-zero" };
    /// assert_eq!(err.as_label(), "scheduler_invalid_config");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SchedulerError::InvalidConfig { .. } => "scheduler_invalid_config",
        }
    }
}

/// # Errors returned by a task body.
///
/// Anything other than [`TaskError::Canceled`] returned after cancellation is
/// reported as an unhandled task failure.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError {
    /// Task execution failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Task observed its cancellation token and exited early.
    #[error("context cancelled")]
    Canceled,
}

impl TaskError {
    /// Convenience constructor for [`TaskError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        TaskError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use taskpulse::TaskError;
    ///
    /// assert_eq!(TaskError::fail("boom").as_label(), "task_failed");
    /// assert_eq!(TaskError::Canceled.as_label(), "task_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Canceled => "task_canceled",
        }
    }
}

/// # Why a run was aborted.
///
/// A run is aborted at most once; the first reason recorded wins and later
/// abort requests are ignored.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The run exceeded the configured task timeout.
    #[error("timed out after {timeout:?}")]
    Timeout {
        /// The timeout that was exceeded.
        timeout: Duration,
    },

    /// A new interval fired under `OverrunPolicy::AbandonAndRun`.
    #[error("abandoned for a new run")]
    Overrun,

    /// The scheduler was stopped or disposed.
    #[error("scheduler stopped")]
    Disposed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = SchedulerError::InvalidConfig {
            field: "interval",
            problem: "must be non-zero",
        };
        assert_eq!(
            err.to_string(),
            "invalid scheduler config: interval must be non-zero"
        );
    }

    #[test]
    fn test_abort_reason_messages() {
        let timeout = AbortReason::Timeout {
            timeout: Duration::from_millis(100),
        };
        assert_eq!(timeout.to_string(), "timed out after 100ms");
        assert_eq!(AbortReason::Overrun.to_string(), "abandoned for a new run");
        assert_eq!(AbortReason::Disposed.to_string(), "scheduler stopped");
    }

    #[test]
    fn test_task_error_display() {
        assert_eq!(TaskError::fail("boom").to_string(), "execution failed: boom");
        assert_eq!(TaskError::Canceled.to_string(), "context cancelled");
    }
}
