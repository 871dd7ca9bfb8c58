//! GetMembershipHandler - Query handler for a single membership record.

use std::sync::Arc;

use crate::application::SharedRegistry;
use crate::domain::foundation::MembershipId;
use crate::domain::membership::{MembershipError, MembershipInfo};

/// Query for a membership by id.
#[derive(Debug, Clone, Copy)]
pub struct GetMembershipQuery {
    pub membership_id: MembershipId,
}

pub type GetMembershipResult = MembershipInfo;

/// Handler for membership lookups. Never deactivates an expired record.
pub struct GetMembershipHandler {
    registry: Arc<SharedRegistry>,
}

impl GetMembershipHandler {
    pub fn new(registry: Arc<SharedRegistry>) -> Self {
        Self { registry }
    }

    pub fn handle(&self, query: GetMembershipQuery) -> Result<GetMembershipResult, MembershipError> {
        self.registry
            .read(|registry| registry.membership_info(query.membership_id))?
    }
}
