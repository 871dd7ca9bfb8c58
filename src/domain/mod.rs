//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, time, errors, events)
//! - `membership` - Membership lifecycle and the registry state machine

pub mod foundation;
pub mod membership;
