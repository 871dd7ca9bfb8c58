//! IssueMembershipHandler - Command handler for issuing memberships.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::SharedRegistry;
use crate::domain::foundation::{Identity, MembershipId, Timestamp};
use crate::domain::membership::{MembershipError, MembershipEvent, Tier};

/// Command to issue a membership.
#[derive(Debug, Clone)]
pub struct IssueMembershipCommand {
    pub caller: Identity,
    pub recipient: Identity,
    pub tier: Tier,

    /// Explicit expiry in Unix seconds; `None` or `0` uses the tier default.
    pub custom_expiry: Option<i64>,
    pub metadata_ref: String,
}

/// Result of successful issuance.
#[derive(Debug, Clone)]
pub struct IssueMembershipResult {
    pub membership_id: MembershipId,
    pub expires_at: Timestamp,
    pub superseded: Option<MembershipId>,
    pub events: Vec<MembershipEvent>,
}

/// Handler for issuing memberships.
pub struct IssueMembershipHandler {
    registry: Arc<SharedRegistry>,
}

impl IssueMembershipHandler {
    pub fn new(registry: Arc<SharedRegistry>) -> Self {
        Self { registry }
    }

    pub fn handle(
        &self,
        cmd: IssueMembershipCommand,
    ) -> Result<IssueMembershipResult, MembershipError> {
        let outcome = self.registry.mutate(Some(&cmd.caller), |registry| {
            registry.issue(
                &cmd.caller,
                &cmd.recipient,
                cmd.tier,
                cmd.custom_expiry,
                cmd.metadata_ref.clone(),
            )
        });

        match outcome {
            Ok((receipt, events)) => {
                info!(
                    membership_id = %receipt.membership_id,
                    recipient = %cmd.recipient,
                    tier = %cmd.tier,
                    expires_at = receipt.expires_at.as_unix_secs(),
                    superseded = ?receipt.superseded.map(|id| id.value()),
                    "Membership issued"
                );
                Ok(IssueMembershipResult {
                    membership_id: receipt.membership_id,
                    expires_at: receipt.expires_at,
                    superseded: receipt.superseded,
                    events,
                })
            }
            Err(e) => {
                warn!(caller = %cmd.caller, recipient = %cmd.recipient, error = %e, "Issuance rejected");
                Err(e)
            }
        }
    }
}
