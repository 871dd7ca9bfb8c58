//! Membership domain events.
//!
//! Emitted exactly once per successful registry operation and never for a
//! failed one. Supersession emits a `BadgeRevoked` for the displaced
//! membership ahead of the event of the operation that caused it.

use crate::domain::foundation::{DomainEvent, EventId, Identity, MembershipId, Timestamp};
use serde::{Deserialize, Serialize};

use super::Tier;

/// Events that occur during the membership lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MembershipEvent {
    /// A membership was issued.
    BadgeIssued {
        event_id: EventId,
        membership_id: MembershipId,
        recipient: Identity,
        issuer: Identity,
        tier: Tier,
        issued_at: Timestamp,
        expires_at: Timestamp,
        metadata_ref: String,
    },

    /// A membership was revoked and its record destroyed.
    BadgeRevoked {
        event_id: EventId,
        membership_id: MembershipId,
        owner: Identity,
        reason: RevocationReason,
        occurred_at: Timestamp,
    },

    /// A membership was found past its expiry and deactivated.
    BadgeExpired {
        event_id: EventId,
        membership_id: MembershipId,
        owner: Identity,
        expires_at: Timestamp,
        occurred_at: Timestamp,
    },

    /// The default validity of a tier changed.
    TierValidityUpdated {
        event_id: EventId,
        tier: Tier,
        previous_secs: u64,
        new_secs: u64,
        updated_by: Identity,
        occurred_at: Timestamp,
    },
}

/// Why a membership was revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevocationReason {
    /// An issuer revoked it explicitly.
    Revoked,

    /// A new membership was issued to the same owner.
    SupersededByIssue,

    /// Another active membership was transferred to the owner.
    SupersededByTransfer,
}

impl std::fmt::Display for RevocationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RevocationReason::Revoked => write!(f, "revoked"),
            RevocationReason::SupersededByIssue => write!(f, "superseded_by_issue"),
            RevocationReason::SupersededByTransfer => write!(f, "superseded_by_transfer"),
        }
    }
}

impl MembershipEvent {
    /// Returns the membership ID associated with this event, if any.
    pub fn membership_id(&self) -> Option<MembershipId> {
        match self {
            MembershipEvent::BadgeIssued { membership_id, .. }
            | MembershipEvent::BadgeRevoked { membership_id, .. }
            | MembershipEvent::BadgeExpired { membership_id, .. } => Some(*membership_id),
            MembershipEvent::TierValidityUpdated { .. } => None,
        }
    }
}

impl DomainEvent for MembershipEvent {
    fn event_type(&self) -> &'static str {
        match self {
            MembershipEvent::BadgeIssued { .. } => "badge.issued.v1",
            MembershipEvent::BadgeRevoked { .. } => "badge.revoked.v1",
            MembershipEvent::BadgeExpired { .. } => "badge.expired.v1",
            MembershipEvent::TierValidityUpdated { .. } => "tier.validity_updated.v1",
        }
    }

    fn aggregate_id(&self) -> String {
        match self {
            MembershipEvent::TierValidityUpdated { tier, .. } => tier.display_name().to_lowercase(),
            other => other
                .membership_id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }

    fn aggregate_type(&self) -> &'static str {
        match self {
            MembershipEvent::TierValidityUpdated { .. } => "TierValidity",
            _ => "Membership",
        }
    }

    fn occurred_at(&self) -> Timestamp {
        match self {
            MembershipEvent::BadgeIssued { issued_at, .. } => *issued_at,
            MembershipEvent::BadgeRevoked { occurred_at, .. }
            | MembershipEvent::BadgeExpired { occurred_at, .. }
            | MembershipEvent::TierValidityUpdated { occurred_at, .. } => *occurred_at,
        }
    }

    fn event_id(&self) -> EventId {
        match self {
            MembershipEvent::BadgeIssued { event_id, .. }
            | MembershipEvent::BadgeRevoked { event_id, .. }
            | MembershipEvent::BadgeExpired { event_id, .. }
            | MembershipEvent::TierValidityUpdated { event_id, .. } => event_id.clone(),
        }
    }
}
