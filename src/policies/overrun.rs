//! # Overrun policies.
//!
//! An *overrun* happens when the next interval fires while the previous run is
//! still executing. [`OverrunPolicy`] decides the outcome:
//!
//! ```text
//! tick ── lock free? ──yes──► begin run
//!              │
//!              no
//!              ├─ AllowToComplete ─► drop the tick, active run continues
//!              └─ AbandonAndRun   ─► cancel active run (Overrun), remember a rerun;
//!                                    the rerun starts once the old run settles
//!                                    or its grace period expires
//! ```

/// Policy applied to a tick that arrives while a run holds the lock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverrunPolicy {
    /// Drop the tick; the active run is left untouched (default).
    #[default]
    AllowToComplete,
    /// Cancel the active run and start a fresh one as soon as it settles.
    AbandonAndRun,
}
