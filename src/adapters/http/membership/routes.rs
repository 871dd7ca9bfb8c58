//! Axum router configuration for registry endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    check_validity, expire_membership, get_active_membership, get_events, get_membership,
    get_stats, get_tier_validities, health, issue_membership, pause_registry, revoke_membership,
    set_tier_validity, transfer_membership, unpause_registry, RegistryAppState,
};

/// Create the registry API router.
///
/// # Routes
///
/// ## Memberships
/// - `POST /memberships` - Issue (issuer)
/// - `GET /memberships/:id` - Membership record
/// - `DELETE /memberships/:id` - Revoke (issuer)
/// - `POST /memberships/:id/expire` - Expire if due (anyone)
/// - `POST /memberships/:id/transfer` - Custody change (ledger)
///
/// ## Owners
/// - `GET /owners/:owner/membership` - Active membership
/// - `GET /owners/:owner/valid` - Validity check
///
/// ## Administration
/// - `GET /tiers` - Tier validity table
/// - `PUT /tiers/:tier` - Change tier validity (admin)
/// - `GET /stats` - Registry counters
/// - `GET /events` - Recent registry events
/// - `POST /registry/pause`, `POST /registry/unpause` - Pause switch (pauser)
pub fn registry_routes() -> Router<RegistryAppState> {
    Router::new()
        // Memberships
        .route("/memberships", post(issue_membership))
        .route(
            "/memberships/:id",
            get(get_membership).delete(revoke_membership),
        )
        .route("/memberships/:id/expire", post(expire_membership))
        .route("/memberships/:id/transfer", post(transfer_membership))
        // Owners
        .route("/owners/:owner/membership", get(get_active_membership))
        .route("/owners/:owner/valid", get(check_validity))
        // Administration
        .route("/tiers", get(get_tier_validities))
        .route("/tiers/:tier", put(set_tier_validity))
        .route("/stats", get(get_stats))
        .route("/events", get(get_events))
        .route("/registry/pause", post(pause_registry))
        .route("/registry/unpause", post(unpause_registry))
}

/// Create the complete registry router with state applied.
///
/// Mounts the API under `/api` and a liveness probe at `/health`.
///
/// # Example
///
/// ```ignore
/// let app = registry_router(app_state)
///     .layer(TraceLayer::new_for_http());
/// ```
pub fn registry_router(state: RegistryAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", registry_routes())
        .with_state(state)
}
