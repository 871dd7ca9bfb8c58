//! SetTierValidityHandler - Admin command to change a tier's default duration.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::SharedRegistry;
use crate::domain::foundation::Identity;
use crate::domain::membership::{MembershipError, Tier};

/// Command to change a tier's default validity.
#[derive(Debug, Clone)]
pub struct SetTierValidityCommand {
    pub caller: Identity,
    pub tier: Tier,

    /// Signed so that non-positive requests can be rejected explicitly.
    pub duration_secs: i64,
}

/// Result of a validity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetTierValidityResult {
    pub previous_secs: u64,
    pub new_secs: u64,
}

/// Handler for tier validity changes.
pub struct SetTierValidityHandler {
    registry: Arc<SharedRegistry>,
}

impl SetTierValidityHandler {
    pub fn new(registry: Arc<SharedRegistry>) -> Self {
        Self { registry }
    }

    pub fn handle(
        &self,
        cmd: SetTierValidityCommand,
    ) -> Result<SetTierValidityResult, MembershipError> {
        let ((previous_secs, new_secs), _events) = self
            .registry
            .mutate(Some(&cmd.caller), |registry| {
                let previous = registry.set_tier_validity(&cmd.caller, cmd.tier, cmd.duration_secs)?;
                Ok((previous, registry.tier_validity(cmd.tier)))
            })
            .inspect_err(|e| {
                warn!(caller = %cmd.caller, tier = %cmd.tier, error = %e, "Tier validity change rejected");
            })?;

        info!(
            tier = %cmd.tier,
            previous_secs,
            new_secs,
            "Tier validity updated"
        );
        Ok(SetTierValidityResult {
            previous_secs,
            new_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::membership::test_support::{who, Harness};

    #[test]
    fn admin_updates_validity() {
        let h = Harness::new();
        let handler = SetTierValidityHandler::new(h.registry.clone());

        let result = handler
            .handle(SetTierValidityCommand {
                caller: who("admin"),
                tier: Tier::Bronze,
                duration_secs: 7 * 86_400,
            })
            .unwrap();

        assert_eq!(result.previous_secs, 30 * 86_400);
        assert_eq!(result.new_secs, 7 * 86_400);
        assert!(h.events.has_event("tier.validity_updated.v1"));
    }

    #[test]
    fn negative_duration_rejected() {
        let h = Harness::new();
        let handler = SetTierValidityHandler::new(h.registry.clone());

        assert!(matches!(
            handler.handle(SetTierValidityCommand {
                caller: who("admin"),
                tier: Tier::Bronze,
                duration_secs: -5,
            }),
            Err(MembershipError::InvalidDuration { .. })
        ));
    }
}
