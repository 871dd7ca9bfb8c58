//! Membership record.
//!
//! A single owned credential with a tier, an issuance time and an expiry
//! time. The registry owns every record; this type only guards its own
//! status transitions and temporal invariant.

use crate::domain::foundation::{Identity, MembershipId, StateMachine, Timestamp};
use serde::{Deserialize, Serialize};

use super::{MembershipError, MembershipStatus, Tier};

/// Membership record.
///
/// # Invariants
///
/// - `id` is never the sentinel and is never reused
/// - `expires_at > issued_at`
/// - Status transitions follow [`MembershipStatus`] rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: MembershipId,
    pub tier: Tier,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
    pub status: MembershipStatus,

    /// Identity whose issuer capability created this membership.
    pub issuer: Identity,

    /// Identity currently holding this membership.
    pub owner: Identity,

    /// Opaque reference resolved by an external metadata store.
    pub metadata_ref: String,
}

impl Membership {
    /// Create a new active membership.
    ///
    /// # Errors
    ///
    /// `InvalidExpiry` if `expires_at` is not strictly after `issued_at`.
    pub fn issue(
        id: MembershipId,
        tier: Tier,
        owner: Identity,
        issuer: Identity,
        issued_at: Timestamp,
        expires_at: Timestamp,
        metadata_ref: impl Into<String>,
    ) -> Result<Self, MembershipError> {
        if expires_at <= issued_at {
            return Err(MembershipError::invalid_expiry(expires_at.as_unix_secs(), issued_at));
        }

        Ok(Self {
            id,
            tier,
            issued_at,
            expires_at,
            status: MembershipStatus::Active,
            issuer,
            owner,
            metadata_ref: metadata_ref.into(),
        })
    }

    /// True while the record has not been deactivated.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// True once `now` has reached the expiry time, regardless of status.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }

    /// True if the record is active and not yet past expiry.
    pub fn is_valid_at(&self, now: Timestamp) -> bool {
        self.is_active() && !self.is_expired_at(now)
    }

    /// Mark this membership as expired.
    ///
    /// # Errors
    ///
    /// Returns error unless the membership is active.
    pub fn expire(&mut self) -> Result<(), MembershipError> {
        self.transition_to(MembershipStatus::Expired, "expire")
    }

    /// Mark this membership as revoked. The caller destroys the record afterwards.
    ///
    /// # Errors
    ///
    /// Returns error if the membership was already revoked.
    pub fn revoke(&mut self) -> Result<(), MembershipError> {
        self.transition_to(MembershipStatus::Revoked, "revoke")
    }

    /// Record a change of custody.
    pub fn transfer_to(&mut self, new_owner: Identity) {
        self.owner = new_owner;
    }

    fn transition_to(
        &mut self,
        target: MembershipStatus,
        attempted: &str,
    ) -> Result<(), MembershipError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| MembershipError::invalid_state(format!("{:?}", self.status), attempted))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membership(issued: i64, expires: i64) -> Membership {
        Membership::issue(
            MembershipId::new(1),
            Tier::Bronze,
            Identity::new("alice"),
            Identity::new("issuer"),
            Timestamp::from_unix_secs(issued),
            Timestamp::from_unix_secs(expires),
            "meta://1",
        )
        .unwrap()
    }

    #[test]
    fn issue_starts_active() {
        let m = membership(1_000, 2_000);
        assert_eq!(m.status, MembershipStatus::Active);
        assert!(m.is_active());
        assert_eq!(m.owner, Identity::new("alice"));
        assert_eq!(m.metadata_ref, "meta://1");
    }

    #[test]
    fn issue_rejects_expiry_not_after_issuance() {
        let result = Membership::issue(
            MembershipId::new(1),
            Tier::Gold,
            Identity::new("alice"),
            Identity::new("issuer"),
            Timestamp::from_unix_secs(1_000),
            Timestamp::from_unix_secs(1_000),
            "",
        );
        assert!(matches!(result, Err(MembershipError::InvalidExpiry { .. })));
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let m = membership(1_000, 2_000);
        assert!(!m.is_expired_at(Timestamp::from_unix_secs(1_999)));
        assert!(m.is_expired_at(Timestamp::from_unix_secs(2_000)));
        assert!(m.is_valid_at(Timestamp::from_unix_secs(1_999)));
        assert!(!m.is_valid_at(Timestamp::from_unix_secs(2_000)));
    }

    #[test]
    fn expire_deactivates_once() {
        let mut m = membership(1_000, 2_000);
        m.expire().unwrap();
        assert_eq!(m.status, MembershipStatus::Expired);
        assert!(!m.is_valid_at(Timestamp::from_unix_secs(1_500)));
        assert!(matches!(m.expire(), Err(MembershipError::InvalidState { .. })));
    }

    #[test]
    fn expired_membership_can_be_revoked() {
        let mut m = membership(1_000, 2_000);
        m.expire().unwrap();
        m.revoke().unwrap();
        assert_eq!(m.status, MembershipStatus::Revoked);
        assert!(m.revoke().is_err());
    }

    #[test]
    fn transfer_changes_owner_only() {
        let mut m = membership(1_000, 2_000);
        m.transfer_to(Identity::new("bob"));
        assert_eq!(m.owner, Identity::new("bob"));
        assert_eq!(m.issuer, Identity::new("issuer"));
        assert!(m.is_active());
    }
}
