//! # Start modes.

/// How [`Scheduler::start`](crate::Scheduler::start) arms the timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StartMode {
    /// Tick once right away, then every interval.
    Immediately,
    /// First tick after one full interval (default).
    #[default]
    Scheduled,
}
