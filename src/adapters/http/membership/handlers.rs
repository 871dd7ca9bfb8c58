//! HTTP handlers for registry endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::events::InMemoryEventLog;
use crate::adapters::http::middleware::{Caller, OptionalCaller};
use crate::application::handlers::membership::{
    ExpireMembershipCommand, ExpireMembershipHandler, GetActiveMembershipHandler,
    GetActiveMembershipQuery, GetMembershipHandler, GetMembershipQuery,
    GetRegistryOverviewHandler, IssueMembershipCommand, IssueMembershipHandler,
    PauseRegistryCommand, PauseRegistryHandler, RevokeMembershipCommand,
    RevokeMembershipHandler, SetTierValidityCommand, SetTierValidityHandler,
    TransferMembershipCommand, TransferMembershipHandler,
};
use crate::application::SharedRegistry;
use crate::domain::foundation::{Identity, MembershipId};
use crate::domain::membership::{MembershipError, Tier};
use crate::ports::{CapabilityChecker, PauseControl};

use super::dto::{
    ActiveMembershipResponse, ErrorResponse, EventLogQuery, ExpireMembershipResponse,
    IssueMembershipRequest, IssueMembershipResponse, MembershipInfoResponse, PauseStateResponse,
    RegistryStatsResponse, SetTierValidityRequest, TierValidityResponse,
    TransferMembershipRequest, ValidityResponse,
};

/// Default and maximum page size for `GET /api/events`.
const DEFAULT_EVENT_LIMIT: usize = 100;
const MAX_EVENT_LIMIT: usize = 1_000;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct RegistryAppState {
    pub registry: Arc<SharedRegistry>,
    pub capabilities: Arc<dyn CapabilityChecker>,
    pub pause_switch: Arc<dyn PauseControl>,
    pub event_log: Arc<InMemoryEventLog>,
}

impl RegistryAppState {
    /// Create handlers on demand from the shared state.
    pub fn issue_handler(&self) -> IssueMembershipHandler {
        IssueMembershipHandler::new(self.registry.clone())
    }

    pub fn revoke_handler(&self) -> RevokeMembershipHandler {
        RevokeMembershipHandler::new(self.registry.clone())
    }

    pub fn expire_handler(&self) -> ExpireMembershipHandler {
        ExpireMembershipHandler::new(self.registry.clone())
    }

    pub fn transfer_handler(&self) -> TransferMembershipHandler {
        TransferMembershipHandler::new(self.registry.clone(), self.capabilities.clone())
    }

    pub fn set_tier_validity_handler(&self) -> SetTierValidityHandler {
        SetTierValidityHandler::new(self.registry.clone())
    }

    pub fn pause_handler(&self) -> PauseRegistryHandler {
        PauseRegistryHandler::new(self.pause_switch.clone(), self.capabilities.clone())
    }

    pub fn get_membership_handler(&self) -> GetMembershipHandler {
        GetMembershipHandler::new(self.registry.clone())
    }

    pub fn active_membership_handler(&self) -> GetActiveMembershipHandler {
        GetActiveMembershipHandler::new(self.registry.clone())
    }

    pub fn overview_handler(&self) -> GetRegistryOverviewHandler {
        GetRegistryOverviewHandler::new(self.registry.clone(), self.pause_switch.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/memberships/:id - Get a membership record
pub async fn get_membership(
    State(state): State<RegistryAppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, RegistryApiError> {
    let query = GetMembershipQuery {
        membership_id: MembershipId::new(id),
    };
    let info = state.get_membership_handler().handle(query)?;
    Ok(Json(MembershipInfoResponse::from(info)))
}

/// GET /api/owners/:owner/membership - Get an owner's active membership
pub async fn get_active_membership(
    State(state): State<RegistryAppState>,
    Path(owner): Path<String>,
) -> Result<impl IntoResponse, RegistryApiError> {
    let query = GetActiveMembershipQuery {
        owner: Identity::new(owner.as_str()),
    };
    let active = state.active_membership_handler().handle(query)?;
    Ok(Json(ActiveMembershipResponse::new(owner, active)))
}

/// GET /api/owners/:owner/valid - Check whether an owner holds a valid membership
pub async fn check_validity(
    State(state): State<RegistryAppState>,
    Path(owner): Path<String>,
) -> Result<impl IntoResponse, RegistryApiError> {
    let valid = state
        .active_membership_handler()
        .is_valid(&Identity::new(owner.as_str()))?;
    Ok(Json(ValidityResponse { owner, valid }))
}

/// GET /api/tiers - Get the tier validity table
pub async fn get_tier_validities(
    State(state): State<RegistryAppState>,
) -> Result<impl IntoResponse, RegistryApiError> {
    let overview = state.overview_handler().handle()?;
    Ok(Json(TierValidityResponse::from_entries(overview.tier_validity)))
}

/// GET /api/stats - Get registry counters
pub async fn get_stats(
    State(state): State<RegistryAppState>,
) -> Result<impl IntoResponse, RegistryApiError> {
    let overview = state.overview_handler().handle()?;
    Ok(Json(RegistryStatsResponse::from(overview)))
}

/// GET /api/events - Most recent registry events, oldest first
pub async fn get_events(
    State(state): State<RegistryAppState>,
    Query(query): Query<EventLogQuery>,
) -> impl IntoResponse {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_EVENT_LIMIT)
        .min(MAX_EVENT_LIMIT);
    Json(state.event_log.recent(limit))
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/PUT/DELETE endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/memberships - Issue a membership
pub async fn issue_membership(
    State(state): State<RegistryAppState>,
    Caller(caller): Caller,
    Json(request): Json<IssueMembershipRequest>,
) -> Result<impl IntoResponse, RegistryApiError> {
    let cmd = IssueMembershipCommand {
        caller,
        recipient: Identity::new(request.recipient),
        tier: request.tier,
        custom_expiry: request.expires_at,
        metadata_ref: request.metadata_ref,
    };

    let result = state.issue_handler().handle(cmd)?;

    let response = IssueMembershipResponse {
        membership_id: result.membership_id.value(),
        expires_at: result.expires_at.as_unix_secs(),
        superseded: result.superseded.map(|id| id.value()),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// DELETE /api/memberships/:id - Revoke and destroy a membership
pub async fn revoke_membership(
    State(state): State<RegistryAppState>,
    Caller(caller): Caller,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, RegistryApiError> {
    let cmd = RevokeMembershipCommand {
        caller,
        membership_id: MembershipId::new(id),
    };
    state.revoke_handler().handle(cmd)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/memberships/:id/expire - Expire a membership if it is due
pub async fn expire_membership(
    State(state): State<RegistryAppState>,
    OptionalCaller(caller): OptionalCaller,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, RegistryApiError> {
    let cmd = ExpireMembershipCommand {
        caller,
        membership_id: MembershipId::new(id),
    };
    let result = state.expire_handler().handle(cmd)?;
    Ok(Json(ExpireMembershipResponse {
        membership_id: id,
        expired: result.expired,
    }))
}

/// POST /api/memberships/:id/transfer - Apply a custody change from the ledger
pub async fn transfer_membership(
    State(state): State<RegistryAppState>,
    Caller(caller): Caller,
    Path(id): Path<u64>,
    Json(request): Json<TransferMembershipRequest>,
) -> Result<impl IntoResponse, RegistryApiError> {
    let cmd = TransferMembershipCommand {
        caller,
        from: Identity::new(request.from),
        to: Identity::new(request.to),
        membership_id: MembershipId::new(id),
    };
    state.transfer_handler().handle(cmd)?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/tiers/:tier - Change a tier's default validity
pub async fn set_tier_validity(
    State(state): State<RegistryAppState>,
    Caller(caller): Caller,
    Path(tier): Path<String>,
    Json(request): Json<SetTierValidityRequest>,
) -> Result<impl IntoResponse, RegistryApiError> {
    let tier: Tier = tier.parse().map_err(|_| RegistryApiError::UnknownTier(tier))?;
    let cmd = SetTierValidityCommand {
        caller,
        tier,
        duration_secs: request.duration_secs,
    };
    state.set_tier_validity_handler().handle(cmd)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/registry/pause - Pause membership movements
pub async fn pause_registry(
    State(state): State<RegistryAppState>,
    Caller(caller): Caller,
) -> Result<impl IntoResponse, RegistryApiError> {
    let result = state.pause_handler().handle(PauseRegistryCommand {
        caller,
        paused: true,
    })?;
    Ok(Json(PauseStateResponse::from(result)))
}

/// POST /api/registry/unpause - Resume membership movements
pub async fn unpause_registry(
    State(state): State<RegistryAppState>,
    Caller(caller): Caller,
) -> Result<impl IntoResponse, RegistryApiError> {
    let result = state.pause_handler().handle(PauseRegistryCommand {
        caller,
        paused: false,
    })?;
    Ok(Json(PauseStateResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts registry errors to HTTP responses.
#[derive(Debug)]
pub enum RegistryApiError {
    Registry(MembershipError),
    UnknownTier(String),
}

impl From<MembershipError> for RegistryApiError {
    fn from(err: MembershipError) -> Self {
        Self::Registry(err)
    }
}

impl IntoResponse for RegistryApiError {
    fn into_response(self) -> axum::response::Response {
        let err = match self {
            RegistryApiError::Registry(err) => err,
            RegistryApiError::UnknownTier(tier) => {
                let body = ErrorResponse::new("VALIDATION_FAILED", format!("Unknown tier '{}'", tier));
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
        };

        let status = match &err {
            MembershipError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            MembershipError::NotFound(_) => StatusCode::NOT_FOUND,
            MembershipError::ZeroRecipient
            | MembershipError::InvalidExpiry { .. }
            | MembershipError::InvalidDuration { .. } => StatusCode::BAD_REQUEST,
            MembershipError::InvalidTransfer { .. } | MembershipError::InvalidState { .. } => {
                StatusCode::CONFLICT
            }
            MembershipError::NotOperational => StatusCode::SERVICE_UNAVAILABLE,
            MembershipError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse::new(err.code().to_string(), err.message());
        (status, Json(body)).into_response()
    }
}
