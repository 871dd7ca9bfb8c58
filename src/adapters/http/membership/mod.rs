//! HTTP adapter for registry endpoints.
//!
//! Exposes the membership registry via REST API under `/api`:
//! - `POST /api/memberships` - Issue a membership
//! - `GET /api/memberships/:id` - Get a membership record
//! - `DELETE /api/memberships/:id` - Revoke a membership
//! - `POST /api/memberships/:id/expire` - Expire a membership if due
//! - `POST /api/memberships/:id/transfer` - Apply a ledger custody change
//! - `GET /api/owners/:owner/membership` - Get an owner's active membership
//! - `GET /api/owners/:owner/valid` - Check an owner's validity
//! - `GET /api/tiers`, `PUT /api/tiers/:tier` - Tier validity table
//! - `GET /api/stats` - Registry counters
//! - `GET /api/events` - Recent registry events
//! - `POST /api/registry/pause`, `POST /api/registry/unpause` - Pause switch

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{RegistryApiError, RegistryAppState};
pub use routes::{registry_router, registry_routes};
