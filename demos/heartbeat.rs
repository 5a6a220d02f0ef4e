//! Heartbeat demo.
//!
//! A liveness ping that usually answers in 50ms but stalls every third call.
//! With `AbandonAndRun`, the stalled ping is cancelled when the next interval
//! fires; the ping honors its token, so the abandonment is graceful.
//!
//! Run with `RUST_LOG=debug cargo run --example heartbeat`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use taskpulse::{OverrunPolicy, Scheduler, SchedulerConfig, StartMode, TaskError, TaskFn, TaskRef};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("taskpulse=debug".parse()?))
        .init();

    let pings = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&pings);
    let heartbeat: TaskRef = TaskFn::arc("heartbeat", move |ctx: CancellationToken| {
        let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            let latency = if n % 3 == 0 {
                Duration::from_secs(10)
            } else {
                Duration::from_millis(50)
            };
            tokio::select! {
                _ = ctx.cancelled() => Err(TaskError::Canceled),
                _ = sleep(latency) => {
                    if n % 5 == 0 {
                        Err(TaskError::fail(format!("ping #{n}: 503 service unavailable")))
                    } else {
                        Ok(())
                    }
                }
            }
        }
    });

    let cfg = SchedulerConfig::new(
        Duration::from_millis(500),
        Duration::from_secs(2),
        Duration::from_millis(200),
    );
    let scheduler = Scheduler::new(cfg, heartbeat, OverrunPolicy::AbandonAndRun)?;

    scheduler.start(StartMode::Immediately);
    sleep(Duration::from_secs(4)).await;
    scheduler.dispose();

    println!("pings sent: {}", pings.load(Ordering::SeqCst));
    Ok(())
}
