//! In-memory event log.
//!
//! Keeps published envelopes in commit order. Serves as the audit trail
//! behind `GET /api/events` and as the capture sink in tests.
//!
//! The log is optionally bounded; once full, the oldest entries are
//! discarded first.

use std::collections::VecDeque;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::EventPublisher;

/// In-memory, append-only event log.
///
/// # Example
///
/// ```ignore
/// let log = Arc::new(InMemoryEventLog::new());
///
/// log.publish(envelope)?;
///
/// assert_eq!(log.event_count(), 1);
/// assert!(log.has_event("badge.issued.v1"));
/// ```
pub struct InMemoryEventLog {
    published: RwLock<VecDeque<EventEnvelope>>,
    capacity: Option<usize>,
}

impl InMemoryEventLog {
    /// Creates an unbounded log.
    pub fn new() -> Self {
        Self {
            published: RwLock::new(VecDeque::new()),
            capacity: None,
        }
    }

    /// Creates a log that retains at most `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            published: RwLock::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity: Some(capacity),
        }
    }

    /// Returns all retained events, oldest first.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.read().iter().cloned().collect()
    }

    /// Returns the most recent `limit` events, oldest first.
    pub fn recent(&self, limit: usize) -> Vec<EventEnvelope> {
        let published = self.read();
        let skip = published.len().saturating_sub(limit);
        published.iter().skip(skip).cloned().collect()
    }

    /// Returns events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.read()
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    /// Returns events for a specific aggregate.
    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.read()
            .iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .cloned()
            .collect()
    }

    /// Returns count of retained events.
    pub fn event_count(&self) -> usize {
        self.read().len()
    }

    /// Checks if a specific event type was published.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.read().iter().any(|e| e.event_type == event_type)
    }

    /// Clears all retained events.
    pub fn clear(&self) {
        self.published
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    // A panicking reader cannot leave the deque half-written, so a
    // poisoned lock is still safe to read.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, VecDeque<EventEnvelope>> {
        self.published
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryEventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for InMemoryEventLog {
    fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let mut published = self.published.write().map_err(|_| {
            DomainError::new(ErrorCode::EventPublishFailed, "event log lock poisoned")
        })?;

        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return Ok(());
            }
            while published.len() >= capacity {
                published.pop_front();
            }
        }
        published.push_back(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EventId, EventMetadata, Timestamp};
    use serde_json::json;

    fn test_envelope(event_type: &str, aggregate_id: &str) -> EventEnvelope {
        EventEnvelope {
            event_id: EventId::new(),
            event_type: event_type.to_string(),
            schema_version: 1,
            aggregate_id: aggregate_id.to_string(),
            aggregate_type: "Membership".to_string(),
            occurred_at: Timestamp::now(),
            payload: json!({}),
            metadata: EventMetadata::default(),
        }
    }

    #[test]
    fn publish_stores_event() {
        let log = InMemoryEventLog::new();

        log.publish(test_envelope("badge.issued.v1", "1")).unwrap();

        assert_eq!(log.event_count(), 1);
        assert!(log.has_event("badge.issued.v1"));
        assert!(!log.has_event("badge.revoked.v1"));
    }

    #[test]
    fn events_of_type_filters_correctly() {
        let log = InMemoryEventLog::new();

        log.publish(test_envelope("badge.issued.v1", "1")).unwrap();
        log.publish(test_envelope("badge.revoked.v1", "1")).unwrap();
        log.publish(test_envelope("badge.issued.v1", "2")).unwrap();

        assert_eq!(log.events_of_type("badge.issued.v1").len(), 2);
        assert_eq!(log.events_for_aggregate("1").len(), 2);
    }

    #[test]
    fn bounded_log_drops_oldest() {
        let log = InMemoryEventLog::with_capacity(2);

        log.publish(test_envelope("a", "1")).unwrap();
        log.publish(test_envelope("b", "2")).unwrap();
        log.publish(test_envelope("c", "3")).unwrap();

        let types: Vec<_> = log
            .published_events()
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(types, vec!["b", "c"]);
    }

    #[test]
    fn recent_returns_tail_in_order() {
        let log = InMemoryEventLog::new();
        for t in ["a", "b", "c", "d"] {
            log.publish(test_envelope(t, "1")).unwrap();
        }

        let types: Vec<_> = log.recent(2).into_iter().map(|e| e.event_type).collect();
        assert_eq!(types, vec!["c", "d"]);
        assert_eq!(log.recent(10).len(), 4);
    }

    #[test]
    fn clear_removes_all_events() {
        let log = InMemoryEventLog::new();
        log.publish_all(vec![test_envelope("a", "1"), test_envelope("b", "2")])
            .unwrap();

        log.clear();

        assert_eq!(log.event_count(), 0);
    }
}
