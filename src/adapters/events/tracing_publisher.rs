//! Event publisher that writes each event to the tracing pipeline.
//!
//! Gives operators a structured audit line per registry event without a
//! separate sink. Never fails.

use tracing::info;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// Logs every event at INFO under the `registry::audit` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

impl EventPublisher for TracingEventPublisher {
    fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        info!(
            target: "registry::audit",
            event_id = %event.event_id,
            event_type = %event.event_type,
            aggregate_type = %event.aggregate_type,
            aggregate_id = %event.aggregate_id,
            caller = event.metadata.caller.as_deref().unwrap_or("-"),
            payload = %event.payload,
            "registry event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EventId, EventMetadata, Timestamp};

    #[test]
    fn publish_always_succeeds() {
        let publisher = TracingEventPublisher::new();
        let envelope = EventEnvelope {
            event_id: EventId::new(),
            event_type: "badge.expired.v1".to_string(),
            schema_version: 1,
            aggregate_id: "7".to_string(),
            aggregate_type: "Membership".to_string(),
            occurred_at: Timestamp::now(),
            payload: serde_json::json!({"kind": "badge_expired"}),
            metadata: EventMetadata::default(),
        };

        assert!(publisher.publish(envelope).is_ok());
    }
}
