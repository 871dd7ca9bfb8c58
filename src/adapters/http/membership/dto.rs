//! HTTP DTOs (Data Transfer Objects) for registry endpoints.
//!
//! These types define the JSON request/response structure for the registry API.
//! Times cross the boundary as Unix seconds and ids as plain integers.

use serde::{Deserialize, Serialize};

use crate::application::handlers::membership::{PauseRegistryResult, RegistryOverview};
use crate::domain::membership::{ActiveMembership, MembershipInfo, MembershipStatus, Tier};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to issue a membership.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueMembershipRequest {
    /// Identity that will own the membership.
    pub recipient: String,
    pub tier: Tier,
    /// Explicit expiry (Unix seconds). Omitted or 0 uses the tier default.
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// Opaque metadata reference.
    #[serde(default)]
    pub metadata_ref: String,
}

/// Custody change reported by the ownership ledger.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferMembershipRequest {
    pub from: String,
    pub to: String,
}

/// Request to change a tier's default validity.
#[derive(Debug, Clone, Deserialize)]
pub struct SetTierValidityRequest {
    pub duration_secs: i64,
}

/// Query parameters for the event log.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventLogQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a successful issuance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueMembershipResponse {
    pub membership_id: u64,
    pub expires_at: i64,
    /// Id of the recipient's previous membership, destroyed by this issuance.
    pub superseded: Option<u64>,
}

/// Full membership record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipInfoResponse {
    pub membership_id: u64,
    pub tier: Tier,
    pub issued_at: i64,
    pub expires_at: i64,
    pub active: bool,
    pub expired: bool,
    pub status: MembershipStatus,
    pub issuer: String,
    pub owner: String,
    pub metadata_ref: String,
}

impl From<MembershipInfo> for MembershipInfoResponse {
    fn from(info: MembershipInfo) -> Self {
        Self {
            membership_id: info.membership_id.value(),
            tier: info.tier,
            issued_at: info.issued_at.as_unix_secs(),
            expires_at: info.expires_at.as_unix_secs(),
            active: info.active,
            expired: info.expired,
            status: info.status,
            issuer: info.issuer.to_string(),
            owner: info.owner.to_string(),
            metadata_ref: info.metadata_ref,
        }
    }
}

/// An owner's active membership. `membership_id` is 0 when there is none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveMembershipResponse {
    pub owner: String,
    pub membership_id: u64,
    pub tier: Option<Tier>,
    pub expires_at: Option<i64>,
    pub valid: bool,
}

impl ActiveMembershipResponse {
    pub fn new(owner: impl Into<String>, active: ActiveMembership) -> Self {
        Self {
            owner: owner.into(),
            membership_id: active.membership_id.value(),
            tier: active.tier,
            expires_at: active.expires_at.map(|t| t.as_unix_secs()),
            valid: active.valid,
        }
    }
}

/// Validity check for an owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidityResponse {
    pub owner: String,
    pub valid: bool,
}

/// Outcome of an expiry check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpireMembershipResponse {
    pub membership_id: u64,
    /// True if this request deactivated the membership.
    pub expired: bool,
}

/// One row of the tier validity table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierValidityEntry {
    pub tier: Tier,
    pub duration_secs: u64,
}

/// The tier validity table, lowest tier first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierValidityResponse {
    pub tiers: Vec<TierValidityEntry>,
}

impl TierValidityResponse {
    pub fn from_entries(entries: impl IntoIterator<Item = (Tier, u64)>) -> Self {
        Self {
            tiers: entries
                .into_iter()
                .map(|(tier, duration_secs)| TierValidityEntry {
                    tier,
                    duration_secs,
                })
                .collect(),
        }
    }
}

/// Registry counters and state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryStatsResponse {
    pub issued_total: u64,
    pub live_records: u64,
    pub active_memberships: u64,
    pub expired_records: u64,
    pub next_id: u64,
    pub paused: bool,
}

impl From<RegistryOverview> for RegistryStatsResponse {
    fn from(overview: RegistryOverview) -> Self {
        Self {
            issued_total: overview.stats.issued_total,
            live_records: overview.stats.live_records,
            active_memberships: overview.stats.active_memberships,
            expired_records: overview.stats.expired_records,
            next_id: overview.next_id.value(),
            paused: overview.paused,
        }
    }
}

/// Pause switch state after a pause/unpause request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PauseStateResponse {
    pub paused: bool,
    pub changed: bool,
}

impl From<PauseRegistryResult> for PauseStateResponse {
    fn from(result: PauseRegistryResult) -> Self {
        Self {
            paused: result.paused,
            changed: result.changed,
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Identity, MembershipId, Timestamp};

    #[test]
    fn issue_request_defaults_optional_fields() {
        let request: IssueMembershipRequest =
            serde_json::from_str(r#"{"recipient": "alice", "tier": "gold"}"#).unwrap();

        assert_eq!(request.tier, Tier::Gold);
        assert_eq!(request.expires_at, None);
        assert!(request.metadata_ref.is_empty());
    }

    #[test]
    fn issue_request_rejects_unknown_tier() {
        let result: Result<IssueMembershipRequest, _> =
            serde_json::from_str(r#"{"recipient": "alice", "tier": "mithril"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn sentinel_active_membership_serializes_zero_id() {
        let response = ActiveMembershipResponse::new("bob", ActiveMembership::none());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["membership_id"], 0);
        assert!(json["tier"].is_null());
        assert_eq!(json["valid"], false);
    }

    #[test]
    fn info_response_uses_unix_seconds() {
        let info = MembershipInfo {
            membership_id: MembershipId::new(3),
            tier: Tier::Silver,
            issued_at: Timestamp::from_unix_secs(100),
            expires_at: Timestamp::from_unix_secs(200),
            active: true,
            status: MembershipStatus::Active,
            issuer: Identity::new("issuer"),
            owner: Identity::new("carol"),
            metadata_ref: "m".to_string(),
            expired: false,
        };

        let response = MembershipInfoResponse::from(info);

        assert_eq!(response.membership_id, 3);
        assert_eq!(response.issued_at, 100);
        assert_eq!(response.expires_at, 200);
        assert_eq!(response.owner, "carol");
    }
}
