//! SharedRegistry - serialized access to the membership registry.
//!
//! The registry is a single-writer state machine. This wrapper puts it
//! behind one `RwLock` so that every mutating operation runs atomically
//! with respect to every other, while queries may run concurrently.
//!
//! Events produced by a mutation are drained and handed to the
//! `EventPublisher` while the write lock is still held, so sinks observe
//! them in commit order. Every envelope of one operation shares a
//! correlation id and carries the initiating caller.
//!
//! A sink failure is logged and does not undo the committed mutation.

use std::sync::{Arc, RwLock};

use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::foundation::{Identity, SerializableDomainEvent};
use crate::domain::membership::{MembershipError, MembershipEvent, MembershipRegistry};
use crate::ports::EventPublisher;

/// Thread-safe handle to the registry plus its event sink.
pub struct SharedRegistry {
    registry: RwLock<MembershipRegistry>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SharedRegistry {
    pub fn new(registry: MembershipRegistry, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            registry: RwLock::new(registry),
            event_publisher,
        }
    }

    /// Run a mutating operation under the write lock and publish its events.
    ///
    /// Returns the operation's value together with the events it produced.
    pub fn mutate<T>(
        &self,
        caller: Option<&Identity>,
        operation: impl FnOnce(&mut MembershipRegistry) -> Result<T, MembershipError>,
    ) -> Result<(T, Vec<MembershipEvent>), MembershipError> {
        let mut registry = self
            .registry
            .write()
            .map_err(|_| MembershipError::infrastructure("registry lock poisoned"))?;

        let outcome = operation(&mut registry);
        let events = registry.take_events();
        let value = outcome?;

        self.publish(caller, &events);
        Ok((value, events))
    }

    /// Run a read-only operation under the read lock.
    pub fn read<T>(
        &self,
        query: impl FnOnce(&MembershipRegistry) -> T,
    ) -> Result<T, MembershipError> {
        let registry = self
            .registry
            .read()
            .map_err(|_| MembershipError::infrastructure("registry lock poisoned"))?;
        Ok(query(&registry))
    }

    fn publish(&self, caller: Option<&Identity>, events: &[MembershipEvent]) {
        if events.is_empty() {
            return;
        }

        let correlation_id = Uuid::new_v4().to_string();
        let envelopes = events
            .iter()
            .map(|event| {
                let envelope = event.to_envelope().with_correlation_id(correlation_id.clone());
                match caller {
                    Some(caller) => envelope.with_caller(caller.as_str()),
                    None => envelope,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            correlation_id = %correlation_id,
            count = envelopes.len(),
            "Publishing registry events"
        );
        if let Err(e) = self.event_publisher.publish_all(envelopes) {
            error!(
                correlation_id = %correlation_id,
                error = %e,
                "Failed to publish registry events"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::StaticCapabilities;
    use crate::adapters::clock::ManualClock;
    use crate::adapters::events::InMemoryEventLog;
    use crate::adapters::gate::PauseSwitch;
    use crate::domain::foundation::{Capability, DomainError, ErrorCode, EventEnvelope};
    use crate::domain::membership::{Tier, TierValidity};

    struct FailingPublisher;

    impl EventPublisher for FailingPublisher {
        fn publish(&self, _event: EventEnvelope) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::EventPublishFailed, "sink down"))
        }
    }

    fn registry() -> MembershipRegistry {
        MembershipRegistry::new(
            TierValidity::default(),
            Arc::new(StaticCapabilities::new().with_grant("issuer", Capability::Issuer)),
            Arc::new(PauseSwitch::new()),
            Arc::new(ManualClock::at(1_000)),
        )
    }

    fn issue(shared: &SharedRegistry, to: &str) -> Result<(), MembershipError> {
        let caller = Identity::new("issuer");
        shared
            .mutate(Some(&caller), |r| {
                r.issue(&caller, &Identity::new(to), Tier::Gold, None, "m")
            })
            .map(|_| ())
    }

    #[test]
    fn mutate_publishes_with_shared_correlation_and_caller() {
        let log = Arc::new(InMemoryEventLog::new());
        let shared = SharedRegistry::new(registry(), log.clone());

        issue(&shared, "alice").unwrap();
        issue(&shared, "alice").unwrap();

        let events = log.published_events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].event_type, "badge.revoked.v1");
        assert_eq!(events[2].event_type, "badge.issued.v1");
        assert_eq!(
            events[1].metadata.correlation_id,
            events[2].metadata.correlation_id
        );
        assert_ne!(
            events[0].metadata.correlation_id,
            events[1].metadata.correlation_id
        );
        assert_eq!(events[2].metadata.caller.as_deref(), Some("issuer"));
    }

    #[test]
    fn failed_mutation_publishes_nothing() {
        let log = Arc::new(InMemoryEventLog::new());
        let shared = SharedRegistry::new(registry(), log.clone());

        assert!(issue(&shared, "").is_err());

        assert_eq!(log.event_count(), 0);
        assert_eq!(shared.read(|r| r.stats().issued_total).unwrap(), 0);
    }

    #[test]
    fn sink_failure_keeps_committed_state() {
        let shared = SharedRegistry::new(registry(), Arc::new(FailingPublisher));

        issue(&shared, "alice").unwrap();

        assert!(shared
            .read(|r| r.has_valid_membership(&Identity::new("alice")))
            .unwrap());
    }
}
