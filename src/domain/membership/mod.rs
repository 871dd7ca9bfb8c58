//! Membership domain module.
//!
//! Handles the membership lifecycle: issuance, supersession, expiry,
//! revocation and custody transfer.
//!
//! # Module Structure
//!
//! - `aggregate` - Membership record
//! - `status` - MembershipStatus state machine
//! - `tier` - Membership tiers
//! - `tier_validity` - Default validity per tier
//! - `registry` - The registry state machine owning every record
//! - `events` - Lifecycle events
//! - `errors` - Membership error type

mod aggregate;
mod errors;
mod events;
mod registry;
mod status;
mod tier;
mod tier_validity;

pub use aggregate::Membership;
pub use errors::MembershipError;
pub use events::{MembershipEvent, RevocationReason};
pub use registry::{
    ActiveMembership, IssueReceipt, MembershipInfo, MembershipRegistry, RegistryStats,
    TransferReceipt,
};
pub use status::MembershipStatus;
pub use tier::Tier;
pub use tier_validity::{TierValidity, MAX_TIER_VALIDITY_SECS};
