//! Membership handlers.
//!
//! Command and query handlers for the membership registry:
//!
//! ## Commands
//! - Issuing, revoking and expiring memberships
//! - Applying custody transfers reported by the ledger
//! - Changing tier validity
//! - Pausing and resuming the registry
//!
//! ## Queries
//! - Membership details
//! - Active membership and validity per owner
//! - Registry overview

mod expire_membership;
mod get_active_membership;
mod get_membership;
mod get_registry_overview;
mod issue_membership;
mod pause_registry;
mod revoke_membership;
mod set_tier_validity;
mod transfer_membership;

#[cfg(test)]
pub(crate) mod test_support;

// Commands
pub use expire_membership::{
    ExpireMembershipCommand, ExpireMembershipHandler, ExpireMembershipResult,
};
pub use issue_membership::{IssueMembershipCommand, IssueMembershipHandler, IssueMembershipResult};
pub use pause_registry::{PauseRegistryCommand, PauseRegistryHandler, PauseRegistryResult};
pub use revoke_membership::{
    RevokeMembershipCommand, RevokeMembershipHandler, RevokeMembershipResult,
};
pub use set_tier_validity::{SetTierValidityCommand, SetTierValidityHandler, SetTierValidityResult};
pub use transfer_membership::{
    TransferMembershipCommand, TransferMembershipHandler, TransferMembershipResult,
};

// Queries
pub use get_active_membership::{
    GetActiveMembershipHandler, GetActiveMembershipQuery, GetActiveMembershipResult,
};
pub use get_membership::{GetMembershipHandler, GetMembershipQuery, GetMembershipResult};
pub use get_registry_overview::{GetRegistryOverviewHandler, RegistryOverview};
