//! GetActiveMembershipHandler - Query handler for an owner's active membership.

use std::sync::Arc;

use crate::application::SharedRegistry;
use crate::domain::foundation::Identity;
use crate::domain::membership::{ActiveMembership, MembershipError};

/// Query for the active membership of an owner.
#[derive(Debug, Clone)]
pub struct GetActiveMembershipQuery {
    pub owner: Identity,
}

pub type GetActiveMembershipResult = ActiveMembership;

/// Handler for active membership and validity lookups.
pub struct GetActiveMembershipHandler {
    registry: Arc<SharedRegistry>,
}

impl GetActiveMembershipHandler {
    pub fn new(registry: Arc<SharedRegistry>) -> Self {
        Self { registry }
    }

    /// The owner's active membership, or the sentinel shape.
    pub fn handle(
        &self,
        query: GetActiveMembershipQuery,
    ) -> Result<GetActiveMembershipResult, MembershipError> {
        self.registry
            .read(|registry| registry.active_membership(&query.owner))
    }

    /// True if the owner holds an active, unexpired membership.
    pub fn is_valid(&self, owner: &Identity) -> Result<bool, MembershipError> {
        self.registry
            .read(|registry| registry.has_valid_membership(owner))
    }
}
