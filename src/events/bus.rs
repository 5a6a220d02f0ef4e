//! # Event bus: log, then broadcast.
//!
//! The coordinator and the scheduler publish from synchronous code, often with
//! the run-state lock held. [`Bus::publish`] therefore never awaits: it writes
//! the event through `tracing` and hands it to a `broadcast` ring buffer.
//!
//! ```text
//! publish(ev) ──► log::record(&ev)        (always)
//!             └─► broadcast::Sender::send (dropped if nobody listens)
//!                      ├─► Scheduler::subscribe() receivers
//!                      └─► one receiver per attached Subscribe worker
//! ```
//!
//! Each receiver lags independently: a slow one skips its oldest events
//! (`RecvError::Lagged`) without holding back the others.

use tokio::sync::broadcast;

use super::event::Event;
use super::log;

/// Logging broadcast channel for scheduler events.
#[derive(Clone, Debug)]
pub(crate) struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a bus retaining up to `capacity` undelivered events per receiver.
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Logs `ev` and delivers it to every live receiver.
    pub(crate) fn publish(&self, ev: Event) {
        log::record(&ev);
        let _ = self.tx.send(ev);
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[test]
    fn test_late_receiver_misses_earlier_events() {
        let bus = Bus::new(4);
        bus.publish(Event::new(EventKind::RunStarting));

        let mut rx = bus.subscribe();
        bus.publish(Event::new(EventKind::RunCompleted).with_task("ping"));

        let ev = rx.try_recv().unwrap();
        assert_eq!(ev.kind, EventKind::RunCompleted);
        assert_eq!(ev.task.as_deref(), Some("ping"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_slow_receiver_lags_alone() {
        let bus = Bus::new(2);
        let mut slow = bus.subscribe();
        for _ in 0..3 {
            bus.publish(Event::new(EventKind::RunSkipped));
        }
        let mut fresh = bus.subscribe();
        bus.publish(Event::new(EventKind::RunStarting));

        assert!(matches!(
            slow.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(2))
        ));
        assert_eq!(fresh.try_recv().unwrap().kind, EventKind::RunStarting);
    }
}
