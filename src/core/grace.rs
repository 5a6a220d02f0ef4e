//! # Grace watch: bounded shutdown window for aborted runs.
//!
//! [`watch`] races an in-flight run against its cancellation token:
//!
//! ```text
//! Active ──(run settles)──────────────────────────────► Settled
//!    │
//!    └──(token fired)──► Cancelled ──(run settles)────► Settled (grace)
//!                              │
//!                              └──(grace elapsed)─────► Expired
//! ```
//!
//! ## Rules
//! - The run's own outcome always wins a tie: both selects are `biased` with
//!   the run polled first, so `Expired` is only returned when the grace timer
//!   elapsed strictly before the run settled.
//! - On `Expired` the run future is dropped. Callers pass a [`JoinHandle`](tokio::task::JoinHandle)
//!   so dropping it detaches the task body, which keeps running in the
//!   background while its eventual result is discarded.
//! - The grace timer only exists after cancellation; an uncancelled run is
//!   awaited for as long as it takes.

use std::future::Future;
use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

/// Terminal state of a watched run.
#[derive(Debug)]
pub(crate) enum GraceOutcome<T> {
    /// The run settled (before or after cancellation, within the grace period).
    Settled(T),
    /// The run was cancelled and did not settle within the grace period.
    Expired,
}

/// Awaits `run`, allowing it `grace` to finish once `token` is cancelled.
pub(crate) async fn watch<F>(
    run: F,
    token: &CancellationToken,
    grace: Duration,
) -> GraceOutcome<F::Output>
where
    F: Future,
{
    tokio::pin!(run);

    select! {
        biased;
        out = &mut run => return GraceOutcome::Settled(out),
        _ = token.cancelled() => {}
    }

    let deadline = time::sleep(grace);
    tokio::pin!(deadline);

    select! {
        biased;
        out = &mut run => GraceOutcome::Settled(out),
        _ = &mut deadline => GraceOutcome::Expired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_settles_without_cancellation() {
        let token = CancellationToken::new();
        let run = async {
            time::sleep(Duration::from_secs(30)).await;
            7
        };

        let out = watch(run, &token, Duration::from_millis(10)).await;
        assert!(matches!(out, GraceOutcome::Settled(7)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settles_within_grace() {
        let token = CancellationToken::new();
        let ctx = token.clone();
        let run = async move {
            ctx.cancelled().await;
            time::sleep(Duration::from_millis(5)).await;
            "done"
        };

        let canceller = token.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let out = watch(run, &token, Duration::from_millis(10)).await;
        assert!(matches!(out, GraceOutcome::Settled("done")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expires_after_grace() {
        let token = CancellationToken::new();
        token.cancel();

        let started = Instant::now();
        let out = watch(future::pending::<()>(), &token, Duration::from_millis(10)).await;

        assert!(matches!(out, GraceOutcome::Expired));
        assert_eq!(started.elapsed(), Duration::from_millis(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_run_wins_over_cancellation() {
        let token = CancellationToken::new();
        token.cancel();

        let out = watch(future::ready(1), &token, Duration::ZERO).await;
        assert!(matches!(out, GraceOutcome::Settled(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_task_keeps_running_detached() {
        let token = CancellationToken::new();
        token.cancel();
        let (tx, rx) = tokio::sync::oneshot::channel();

        let body = tokio::spawn(async move {
            time::sleep(Duration::from_secs(1)).await;
            let _ = tx.send(());
        });

        let out = watch(body, &token, Duration::from_millis(10)).await;
        assert!(matches!(out, GraceOutcome::Expired));
        assert!(rx.await.is_ok());
    }
}
