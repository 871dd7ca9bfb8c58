//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates registry operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

mod expiry_sweeper;
pub mod handlers;
mod shared_registry;

pub use expiry_sweeper::{ExpirySweeper, ExpirySweeperConfig};
pub use shared_registry::SharedRegistry;
