//! # Drive a single run of the task.
//!
//! Executes one run of the scheduled [`Task`](crate::Task) with timeout and
//! grace-period supervision, then hands the outcome back to the coordinator.
//!
//! ## Flow
//! ```text
//! spawn(task.run(token)) ──► grace::watch(body, token, grace)
//!        │                         │
//!        │   timeout elapsed ──► coordinator.time_out(run)  (cancels token once)
//!        │                         │
//!        ▼                         ▼
//!                    coordinator.settle(run, outcome)
//! ```
//!
//! ## Rules
//! - The task body runs in its **own** tokio task, so a panic is caught as a
//!   `JoinError` and a body that outlives its grace period can be detached
//!   without being dropped.
//! - The timeout races the whole watch, including a grace period already in
//!   progress; the coordinator ignores it if the run was aborted earlier.
//! - A run whose outcome wins a tie with the timeout is never timed out.

use std::sync::Arc;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use super::coordinator::Coordinator;
use super::grace::{self, GraceOutcome};
use crate::error::TaskError;

/// Result of a run as seen by the coordinator.
pub(crate) type RunOutcome = GraceOutcome<Result<Result<(), TaskError>, tokio::task::JoinError>>;

/// Executes one run identified by `run`, reporting its outcome to `coord`.
pub(crate) async fn run_once(coord: Arc<Coordinator>, run: u64, token: CancellationToken) {
    let task = Arc::clone(coord.task());
    let ctx = token.clone();
    let body = tokio::spawn(async move { task.run(ctx).await });

    let watch = grace::watch(body, &token, coord.config().grace);
    tokio::pin!(watch);

    let timeout = coord.config().timeout;
    let deadline = time::sleep(timeout);
    tokio::pin!(deadline);

    let finished = select! {
        biased;
        out = &mut watch => Some(out),
        _ = &mut deadline => None,
    };
    let outcome = match finished {
        Some(out) => out,
        None => {
            coord.time_out(run, timeout);
            watch.await
        }
    };

    coord.settle(run, outcome);
}
