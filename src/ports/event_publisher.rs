//! EventPublisher port - Interface for the event/audit sink.
//!
//! This port defines how the application publishes registry events without
//! knowing about the underlying sink (in-memory log, tracing, ...).
//!
//! Publishing is synchronous: it runs while the registry write lock is
//! held, so sinks observe events in commit order.

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - Events are appended in the order given
/// - Errors are propagated to the caller
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish multiple events in order.
    ///
    /// The default implementation publishes one at a time and stops at the
    /// first failure.
    fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event)?;
        }
        Ok(())
    }
}
