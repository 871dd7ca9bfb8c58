//! TransferMembershipHandler - Applies custody changes from the ownership ledger.
//!
//! Only an identity holding the `Ledger` capability may report transfers.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::SharedRegistry;
use crate::domain::foundation::{Capability, Identity, MembershipId};
use crate::domain::membership::{MembershipError, MembershipEvent};
use crate::ports::CapabilityChecker;

/// Command reporting that `membership_id` moved from `from` to `to`.
#[derive(Debug, Clone)]
pub struct TransferMembershipCommand {
    pub caller: Identity,
    pub from: Identity,
    pub to: Identity,
    pub membership_id: MembershipId,
}

/// Result of an applied transfer.
#[derive(Debug, Clone)]
pub struct TransferMembershipResult {
    /// True if the membership became the recipient's active membership.
    pub activated: bool,
    pub superseded: Option<MembershipId>,
    pub events: Vec<MembershipEvent>,
}

/// Handler for ledger transfer notifications.
pub struct TransferMembershipHandler {
    registry: Arc<SharedRegistry>,
    capabilities: Arc<dyn CapabilityChecker>,
}

impl TransferMembershipHandler {
    pub fn new(registry: Arc<SharedRegistry>, capabilities: Arc<dyn CapabilityChecker>) -> Self {
        Self {
            registry,
            capabilities,
        }
    }

    pub fn handle(
        &self,
        cmd: TransferMembershipCommand,
    ) -> Result<TransferMembershipResult, MembershipError> {
        if !self
            .capabilities
            .has_capability(&cmd.caller, Capability::Ledger)
        {
            warn!(caller = %cmd.caller, "Transfer reported by non-ledger caller");
            return Err(MembershipError::unauthorized(cmd.caller, Capability::Ledger));
        }

        let (receipt, events) = self
            .registry
            .mutate(Some(&cmd.caller), |registry| {
                registry.on_transfer(&cmd.from, &cmd.to, cmd.membership_id)
            })
            .inspect_err(|e| {
                warn!(membership_id = %cmd.membership_id, from = %cmd.from, to = %cmd.to, error = %e, "Transfer rejected");
            })?;

        info!(
            membership_id = %cmd.membership_id,
            from = %cmd.from,
            to = %cmd.to,
            activated = receipt.activated,
            "Membership transferred"
        );
        Ok(TransferMembershipResult {
            activated: receipt.activated,
            superseded: receipt.superseded,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::membership::test_support::{who, Harness};
    use crate::domain::membership::Tier;

    fn issue(h: &Harness, to: &str) -> MembershipId {
        let caller = who("issuer");
        h.registry
            .mutate(Some(&caller), |r| r.issue(&caller, &who(to), Tier::Gold, None, "m"))
            .unwrap()
            .0
            .membership_id
    }

    fn command(caller: &str, id: MembershipId) -> TransferMembershipCommand {
        TransferMembershipCommand {
            caller: who(caller),
            from: who("dave"),
            to: who("erin"),
            membership_id: id,
        }
    }

    #[test]
    fn ledger_transfer_moves_active_membership() {
        let h = Harness::new();
        let id = issue(&h, "dave");
        let handler = TransferMembershipHandler::new(h.registry.clone(), h.capabilities.clone());

        let result = handler.handle(command("ledger", id)).unwrap();

        assert!(result.activated);
        assert!(result.events.is_empty());
        assert!(h
            .registry
            .read(|r| r.has_valid_membership(&who("erin")) && !r.has_valid_membership(&who("dave")))
            .unwrap());
    }

    #[test]
    fn non_ledger_caller_is_rejected() {
        let h = Harness::new();
        let id = issue(&h, "dave");
        let handler = TransferMembershipHandler::new(h.registry.clone(), h.capabilities.clone());

        assert!(matches!(
            handler.handle(command("issuer", id)),
            Err(MembershipError::Unauthorized {
                capability: Capability::Ledger,
                ..
            })
        ));
    }

    #[test]
    fn revoked_ledger_grant_takes_effect() {
        let h = Harness::new();
        let id = issue(&h, "dave");
        h.capabilities.revoke(&who("ledger"), Capability::Ledger);
        let handler = TransferMembershipHandler::new(h.registry.clone(), h.capabilities.clone());

        assert!(handler.handle(command("ledger", id)).is_err());
    }
}
