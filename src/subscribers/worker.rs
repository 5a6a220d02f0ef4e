//! One worker task per subscriber, each reading its own bus receiver.
//!
//! ```text
//! Bus ──► rx(S1) ──► worker S1 ──► S1.on_event()   (panic caught, logged)
//!     └─► rx(SN) ──► worker SN ──► SN.on_event()
//! ```
//!
//! A worker ends when the bus closes, i.e. once the scheduler and all of its
//! in-flight runs are gone.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

use super::Subscribe;
use crate::events::{Bus, Event};

/// Subscribes every entry of `subs` to `bus` and spawns its worker.
///
/// Must be called from within a Tokio runtime.
pub(crate) fn spawn_workers(bus: &Bus, subs: Vec<Arc<dyn Subscribe>>) {
    for sub in subs {
        tokio::spawn(drive(sub, bus.subscribe()));
    }
}

async fn drive(sub: Arc<dyn Subscribe>, mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(ev) => {
                let handled = AssertUnwindSafe(sub.on_event(&ev)).catch_unwind().await;
                if handled.is_err() {
                    warn!(subscriber = sub.name(), seq = ev.seq, "subscriber panicked");
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(subscriber = sub.name(), skipped, "subscriber lagged behind the event bus");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
