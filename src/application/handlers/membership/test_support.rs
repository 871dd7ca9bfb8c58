//! Shared wiring for handler tests.

use std::sync::Arc;

use crate::adapters::auth::StaticCapabilities;
use crate::adapters::clock::ManualClock;
use crate::adapters::events::InMemoryEventLog;
use crate::adapters::gate::PauseSwitch;
use crate::application::SharedRegistry;
use crate::domain::foundation::{Capability, Identity};
use crate::domain::membership::{MembershipRegistry, TierValidity};

pub const START: i64 = 1_700_000_000;

pub struct Harness {
    pub registry: Arc<SharedRegistry>,
    pub clock: Arc<ManualClock>,
    pub switch: Arc<PauseSwitch>,
    pub capabilities: Arc<StaticCapabilities>,
    pub events: Arc<InMemoryEventLog>,
}

impl Harness {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::at(START));
        let switch = Arc::new(PauseSwitch::new());
        let capabilities = Arc::new(
            StaticCapabilities::new()
                .with_grant("issuer", Capability::Issuer)
                .with_grant("admin", Capability::Admin)
                .with_grant("pauser", Capability::Pauser)
                .with_grant("ledger", Capability::Ledger),
        );
        let events = Arc::new(InMemoryEventLog::new());
        let registry = MembershipRegistry::new(
            TierValidity::default(),
            capabilities.clone(),
            switch.clone(),
            clock.clone(),
        );
        Self {
            registry: Arc::new(SharedRegistry::new(registry, events.clone())),
            clock,
            switch,
            capabilities,
            events,
        }
    }
}

pub fn who(name: &str) -> Identity {
    Identity::new(name)
}
