//! Application handlers.
//!
//! Command and query handlers that orchestrate registry operations.

pub mod membership;

pub use membership::*;
