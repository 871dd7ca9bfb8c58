//! HTTP adapters - REST API implementations.

pub mod membership;
pub mod middleware;

pub use membership::{registry_router, RegistryAppState};
