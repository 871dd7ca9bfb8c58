//! Membership-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Unauthorized | 403 |
//! | NotFound | 404 |
//! | ZeroRecipient | 400 |
//! | InvalidExpiry | 400 |
//! | InvalidDuration | 400 |
//! | InvalidTransfer | 409 |
//! | InvalidState | 409 |
//! | NotOperational | 503 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{Capability, DomainError, ErrorCode, Identity, MembershipId, Timestamp};

/// Membership-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// Caller does not hold the capability the operation requires.
    Unauthorized {
        caller: Identity,
        capability: Capability,
    },

    /// Membership id does not exist or was destroyed.
    NotFound(MembershipId),

    /// Recipient is the null identity.
    ZeroRecipient,

    /// Custom expiry is unrepresentable or not strictly after the issuance
    /// time. Both values are Unix seconds.
    InvalidExpiry { expires_at: i64, now: i64 },

    /// Tier validity duration is not positive or out of range.
    InvalidDuration { seconds: i128 },

    /// Registry is paused.
    NotOperational,

    /// Ownership ledger reported a transfer that cannot apply.
    InvalidTransfer {
        membership_id: MembershipId,
        reason: String,
    },

    /// Invalid status for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl MembershipError {
    pub fn unauthorized(caller: Identity, capability: Capability) -> Self {
        MembershipError::Unauthorized { caller, capability }
    }

    pub fn not_found(id: MembershipId) -> Self {
        MembershipError::NotFound(id)
    }

    pub fn zero_recipient() -> Self {
        MembershipError::ZeroRecipient
    }

    pub fn invalid_expiry(expires_at: i64, now: Timestamp) -> Self {
        MembershipError::InvalidExpiry {
            expires_at,
            now: now.as_unix_secs(),
        }
    }

    pub fn invalid_duration(seconds: impl Into<i128>) -> Self {
        MembershipError::InvalidDuration {
            seconds: seconds.into(),
        }
    }

    pub fn not_operational() -> Self {
        MembershipError::NotOperational
    }

    pub fn invalid_transfer(membership_id: MembershipId, reason: impl Into<String>) -> Self {
        MembershipError::InvalidTransfer {
            membership_id,
            reason: reason.into(),
        }
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        MembershipError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::Unauthorized { .. } => ErrorCode::Unauthorized,
            MembershipError::NotFound(_) => ErrorCode::MembershipNotFound,
            MembershipError::ZeroRecipient => ErrorCode::ZeroRecipient,
            MembershipError::InvalidExpiry { .. } => ErrorCode::InvalidExpiry,
            MembershipError::InvalidDuration { .. } => ErrorCode::InvalidDuration,
            MembershipError::NotOperational => ErrorCode::NotOperational,
            MembershipError::InvalidTransfer { .. } => ErrorCode::InvalidTransfer,
            MembershipError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            MembershipError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            MembershipError::Unauthorized { caller, capability } => {
                format!("{} does not hold the {} capability", caller, capability)
            }
            MembershipError::NotFound(id) => format!("Membership not found: {}", id),
            MembershipError::ZeroRecipient => "Recipient must not be the null identity".to_string(),
            MembershipError::InvalidExpiry { expires_at, now } => format!(
                "Expiry {} is not a valid time after the current time {}",
                expires_at, now
            ),
            MembershipError::InvalidDuration { seconds } => {
                format!("Tier validity must be a positive duration, got {}s", seconds)
            }
            MembershipError::NotOperational => "Registry is paused".to_string(),
            MembershipError::InvalidTransfer {
                membership_id,
                reason,
            } => format!("Cannot transfer membership {}: {}", membership_id, reason),
            MembershipError::InvalidState { current, attempted } => {
                format!("Cannot {} membership in {} state", attempted, current)
            }
            MembershipError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if the caller may retry the whole operation.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MembershipError::Infrastructure(_) | MembershipError::NotOperational
        )
    }
}

impl std::fmt::Display for MembershipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipError {}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::NotOperational => MembershipError::NotOperational,
            ErrorCode::ZeroRecipient => MembershipError::ZeroRecipient,
            ErrorCode::InvalidStateTransition => MembershipError::InvalidState {
                current: "unknown".to_string(),
                attempted: err.message,
            },
            _ => MembershipError::Infrastructure(err.to_string()),
        }
    }
}

impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        let domain = DomainError::new(err.code(), err.message());
        match &err {
            MembershipError::NotFound(id) => domain.with_detail("membership_id", id.to_string()),
            MembershipError::InvalidTransfer { membership_id, .. } => {
                domain.with_detail("membership_id", membership_id.to_string())
            }
            MembershipError::Unauthorized { caller, capability } => domain
                .with_detail("caller", caller.to_string())
                .with_detail("capability", capability.to_string()),
            _ => domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_variants() {
        assert_eq!(
            MembershipError::unauthorized(Identity::new("eve"), Capability::Issuer).code(),
            ErrorCode::Unauthorized
        );
        assert_eq!(
            MembershipError::not_found(MembershipId::new(3)).code(),
            ErrorCode::MembershipNotFound
        );
        assert_eq!(MembershipError::zero_recipient().code(), ErrorCode::ZeroRecipient);
        assert_eq!(
            MembershipError::invalid_expiry(1, Timestamp::from_unix_secs(2)).code(),
            ErrorCode::InvalidExpiry
        );
        assert_eq!(MembershipError::invalid_duration(0i64).code(), ErrorCode::InvalidDuration);
        assert_eq!(MembershipError::not_operational().code(), ErrorCode::NotOperational);
        assert_eq!(
            MembershipError::invalid_transfer(MembershipId::new(1), "same owner").code(),
            ErrorCode::InvalidTransfer
        );
        assert_eq!(MembershipError::infrastructure("lock").code(), ErrorCode::InternalError);
    }

    #[test]
    fn unauthorized_message_names_caller_and_capability() {
        let msg = MembershipError::unauthorized(Identity::new("eve"), Capability::Admin).message();
        assert!(msg.contains("eve"));
        assert!(msg.contains("admin"));
    }

    #[test]
    fn not_found_message_includes_id() {
        let err = MembershipError::not_found(MembershipId::new(77));
        assert!(err.message().contains("77"));
    }

    #[test]
    fn invalid_expiry_message_includes_both_times() {
        let err = MembershipError::invalid_expiry(999, Timestamp::from_unix_secs(1000));
        let msg = err.message();
        assert!(msg.contains("999"));
        assert!(msg.contains("1000"));
    }

    #[test]
    fn only_transient_errors_are_retryable() {
        assert!(MembershipError::infrastructure("poisoned").is_retryable());
        assert!(MembershipError::not_operational().is_retryable());
        assert!(!MembershipError::zero_recipient().is_retryable());
        assert!(!MembershipError::not_found(MembershipId::new(1)).is_retryable());
    }

    #[test]
    fn display_matches_message() {
        let err = MembershipError::invalid_duration(-1i64);
        assert_eq!(format!("{}", err), err.message());
    }

    #[test]
    fn converts_to_domain_error_with_details() {
        let domain: DomainError = MembershipError::not_found(MembershipId::new(9)).into();
        assert_eq!(domain.code, ErrorCode::MembershipNotFound);
        assert_eq!(domain.details.get("membership_id"), Some(&"9".to_string()));
    }

    #[test]
    fn converts_from_domain_error() {
        let err: MembershipError = DomainError::new(ErrorCode::NotOperational, "paused").into();
        assert_eq!(err, MembershipError::NotOperational);

        let err: MembershipError = DomainError::new(ErrorCode::EventPublishFailed, "sink down").into();
        assert!(matches!(err, MembershipError::Infrastructure(_)));
    }
}
