//! Capability checker port.
//!
//! The registry never decides who is an issuer or admin. It asks this port
//! synchronously before any privileged mutation and treats `false` as
//! `Unauthorized`.
//!
//! # Design
//!
//! Fail-secure: implementations that cannot reach their backing role store
//! must answer `false`.

use crate::domain::foundation::{Capability, Identity};

/// Port for capability (role) checks.
pub trait CapabilityChecker: Send + Sync {
    /// Returns true if `identity` currently holds `capability`.
    fn has_capability(&self, identity: &Identity, capability: Capability) -> bool;
}
