//! Capability checker adapters.
//!
//! - `StaticCapabilities` - Identity → capability table built from configuration

mod static_capabilities;

pub use static_capabilities::StaticCapabilities;
