//! GetRegistryOverviewHandler - Counters, tier table and pause state.

use std::sync::Arc;

use serde::Serialize;

use crate::application::SharedRegistry;
use crate::domain::foundation::MembershipId;
use crate::domain::membership::{MembershipError, RegistryStats, Tier};
use crate::ports::PauseControl;

/// Registry-wide snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryOverview {
    pub stats: RegistryStats,
    pub next_id: MembershipId,
    pub paused: bool,
    pub tier_validity: Vec<(Tier, u64)>,
}

/// Handler for registry overview queries.
pub struct GetRegistryOverviewHandler {
    registry: Arc<SharedRegistry>,
    switch: Arc<dyn PauseControl>,
}

impl GetRegistryOverviewHandler {
    pub fn new(registry: Arc<SharedRegistry>, switch: Arc<dyn PauseControl>) -> Self {
        Self { registry, switch }
    }

    pub fn handle(&self) -> Result<RegistryOverview, MembershipError> {
        let paused = self.switch.is_paused();
        self.registry.read(|registry| RegistryOverview {
            stats: registry.stats(),
            next_id: registry.next_id(),
            paused,
            tier_validity: registry.tier_validities().entries().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::membership::test_support::{who, Harness};

    #[test]
    fn overview_reflects_registry() {
        let h = Harness::new();
        let caller = who("issuer");
        h.registry
            .mutate(Some(&caller), |r| r.issue(&caller, &who("a"), Tier::Gold, None, "m"))
            .unwrap();
        h.switch.pause();
        let handler = GetRegistryOverviewHandler::new(h.registry.clone(), h.switch.clone());

        let overview = handler.handle().unwrap();

        assert_eq!(overview.stats.issued_total, 1);
        assert_eq!(overview.stats.active_memberships, 1);
        assert_eq!(overview.next_id, MembershipId::new(2));
        assert!(overview.paused);
        assert_eq!(overview.tier_validity.len(), 5);
        assert_eq!(overview.tier_validity[0], (Tier::Bronze, 30 * 86_400));
    }
}
