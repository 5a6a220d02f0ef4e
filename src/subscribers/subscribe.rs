use async_trait::async_trait;

use crate::events::Event;

/// Custom handler for scheduler events (metrics, alerting, audit trails).
///
/// Each attached subscriber gets its own worker and its own view of the event
/// bus, so a slow `on_event` delays only that subscriber. If it falls more than
/// [`SchedulerConfig::bus_capacity`](crate::SchedulerConfig) events behind, the
/// oldest ones are skipped for it and a warning is logged.
///
/// Logging does not need a subscriber: every event is already written through
/// `tracing` when it is published.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles one event. A panic is caught and logged; the worker keeps going.
    async fn on_event(&self, event: &Event);

    /// Name used in this subscriber's warnings.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
