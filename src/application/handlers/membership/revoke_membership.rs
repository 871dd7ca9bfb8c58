//! RevokeMembershipHandler - Command handler for revoking memberships.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::SharedRegistry;
use crate::domain::foundation::{Identity, MembershipId};
use crate::domain::membership::{Membership, MembershipError, MembershipEvent};

/// Command to revoke a membership.
#[derive(Debug, Clone)]
pub struct RevokeMembershipCommand {
    pub caller: Identity,
    pub membership_id: MembershipId,
}

/// Result of successful revocation.
#[derive(Debug, Clone)]
pub struct RevokeMembershipResult {
    /// The record as it was immediately before destruction.
    pub revoked: Membership,
    pub events: Vec<MembershipEvent>,
}

/// Handler for revoking memberships.
pub struct RevokeMembershipHandler {
    registry: Arc<SharedRegistry>,
}

impl RevokeMembershipHandler {
    pub fn new(registry: Arc<SharedRegistry>) -> Self {
        Self { registry }
    }

    pub fn handle(
        &self,
        cmd: RevokeMembershipCommand,
    ) -> Result<RevokeMembershipResult, MembershipError> {
        let (revoked, events) = self
            .registry
            .mutate(Some(&cmd.caller), |registry| {
                registry.revoke(&cmd.caller, cmd.membership_id)
            })
            .inspect_err(|e| {
                warn!(caller = %cmd.caller, membership_id = %cmd.membership_id, error = %e, "Revocation rejected");
            })?;

        info!(
            membership_id = %cmd.membership_id,
            owner = %revoked.owner,
            "Membership revoked"
        );
        Ok(RevokeMembershipResult { revoked, events })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::membership::test_support::{who, Harness};
    use crate::domain::membership::{MembershipStatus, Tier};

    fn issue(h: &Harness, to: &str) -> MembershipId {
        let caller = who("issuer");
        h.registry
            .mutate(Some(&caller), |r| r.issue(&caller, &who(to), Tier::Silver, None, "m"))
            .unwrap()
            .0
            .membership_id
    }

    #[test]
    fn revokes_and_destroys() {
        let h = Harness::new();
        let id = issue(&h, "alice");
        let handler = RevokeMembershipHandler::new(h.registry.clone());

        let result = handler
            .handle(RevokeMembershipCommand {
                caller: who("issuer"),
                membership_id: id,
            })
            .unwrap();

        assert_eq!(result.revoked.status, MembershipStatus::Revoked);
        assert!(h.events.has_event("badge.revoked.v1"));
        assert!(h.registry.read(|r| r.membership(id).is_none()).unwrap());
    }

    #[test]
    fn unknown_id_is_not_found() {
        let h = Harness::new();
        let handler = RevokeMembershipHandler::new(h.registry.clone());

        let err = handler
            .handle(RevokeMembershipCommand {
                caller: who("issuer"),
                membership_id: MembershipId::new(42),
            })
            .unwrap_err();

        assert_eq!(err, MembershipError::NotFound(MembershipId::new(42)));
    }
}
