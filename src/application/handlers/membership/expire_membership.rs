//! ExpireMembershipHandler - Permissionless expiry check.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::SharedRegistry;
use crate::domain::foundation::{Identity, MembershipId};
use crate::domain::membership::{MembershipError, MembershipEvent};

/// Command to check a membership and deactivate it if past expiry.
#[derive(Debug, Clone)]
pub struct ExpireMembershipCommand {
    /// Recorded for audit only; anyone may trigger expiry.
    pub caller: Option<Identity>,
    pub membership_id: MembershipId,
}

/// Result of an expiry check.
#[derive(Debug, Clone)]
pub struct ExpireMembershipResult {
    /// True if this call deactivated the membership.
    pub expired: bool,
    pub events: Vec<MembershipEvent>,
}

/// Handler for expiry checks.
pub struct ExpireMembershipHandler {
    registry: Arc<SharedRegistry>,
}

impl ExpireMembershipHandler {
    pub fn new(registry: Arc<SharedRegistry>) -> Self {
        Self { registry }
    }

    pub fn handle(
        &self,
        cmd: ExpireMembershipCommand,
    ) -> Result<ExpireMembershipResult, MembershipError> {
        let (expired, events) = self
            .registry
            .mutate(cmd.caller.as_ref(), |registry| {
                registry.check_and_expire(cmd.membership_id)
            })?;

        if expired {
            info!(membership_id = %cmd.membership_id, "Membership expired");
        } else {
            debug!(membership_id = %cmd.membership_id, "Membership not due for expiry");
        }
        Ok(ExpireMembershipResult { expired, events })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::membership::test_support::{who, Harness};
    use crate::domain::membership::Tier;

    #[test]
    fn expires_only_after_deadline() {
        let h = Harness::new();
        let caller = who("issuer");
        let id = h
            .registry
            .mutate(Some(&caller), |r| r.issue(&caller, &who("bob"), Tier::Bronze, None, "m"))
            .unwrap()
            .0
            .membership_id;
        let handler = ExpireMembershipHandler::new(h.registry.clone());
        let cmd = ExpireMembershipCommand {
            caller: None,
            membership_id: id,
        };

        assert!(!handler.handle(cmd.clone()).unwrap().expired);

        h.clock.advance(30 * 86_400);
        let result = handler.handle(cmd.clone()).unwrap();
        assert!(result.expired);
        assert_eq!(result.events.len(), 1);

        assert!(!handler.handle(cmd).unwrap().expired);
        assert_eq!(h.events.events_of_type("badge.expired.v1").len(), 1);
    }
}
