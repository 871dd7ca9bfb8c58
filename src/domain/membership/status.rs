//! Membership status state machine.
//!
//! A membership starts `Active`. Expiry detection moves it to `Expired`,
//! where the record stays queryable. Revocation, direct or by supersession,
//! moves it to `Revoked`, after which the record is destroyed.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a membership record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Issued and not yet deactivated.
    Active,

    /// Deactivated by expiry detection. Record retained.
    Expired,

    /// Deactivated by revocation or supersession. Record destroyed.
    Revoked,
}

impl MembershipStatus {
    /// Returns true if this status counts as an active membership.
    pub fn is_active(&self) -> bool {
        matches!(self, MembershipStatus::Active)
    }
}

impl StateMachine for MembershipStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MembershipStatus::*;
        matches!(
            (self, target),
            (Active, Expired) | (Active, Revoked) | (Expired, Revoked)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MembershipStatus::*;
        match self {
            Active => vec![Expired, Revoked],
            Expired => vec![Revoked],
            Revoked => vec![],
        }
    }
}
