//! Capability table loaded from configuration.
//!
//! Each identity maps to the set of capabilities it holds. Grants can be
//! added at startup and at runtime; the null identity never holds any.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::domain::foundation::{Capability, Identity};
use crate::ports::CapabilityChecker;

/// In-memory identity → capabilities table.
#[derive(Debug, Default)]
pub struct StaticCapabilities {
    grants: RwLock<HashMap<Identity, HashSet<Capability>>>,
}

impl StaticCapabilities {
    /// Creates an empty table; every check fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(identity, capability)` pairs.
    pub fn from_grants(grants: impl IntoIterator<Item = (Identity, Capability)>) -> Self {
        let table = Self::new();
        for (identity, capability) in grants {
            table.grant(identity, capability);
        }
        table
    }

    /// Adds a grant (builder form).
    pub fn with_grant(self, identity: impl Into<Identity>, capability: Capability) -> Self {
        self.grant(identity.into(), capability);
        self
    }

    /// Adds a grant. Grants to the null identity are ignored.
    pub fn grant(&self, identity: Identity, capability: Capability) {
        if identity.is_null() {
            return;
        }
        self.grants
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry(identity)
            .or_default()
            .insert(capability);
    }

    /// Removes a grant. Returns true if it was present.
    pub fn revoke(&self, identity: &Identity, capability: Capability) -> bool {
        self.grants
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get_mut(identity)
            .map(|caps| caps.remove(&capability))
            .unwrap_or(false)
    }

    /// Number of identities holding `capability`.
    pub fn holders(&self, capability: Capability) -> usize {
        self.grants
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .values()
            .filter(|caps| caps.contains(&capability))
            .count()
    }
}

impl CapabilityChecker for StaticCapabilities {
    fn has_capability(&self, identity: &Identity, capability: Capability) -> bool {
        self.grants
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(identity)
            .is_some_and(|caps| caps.contains(&capability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_are_per_capability() {
        let table = StaticCapabilities::new()
            .with_grant("alice", Capability::Issuer)
            .with_grant("bob", Capability::Admin);

        assert!(table.has_capability(&Identity::new("alice"), Capability::Issuer));
        assert!(!table.has_capability(&Identity::new("alice"), Capability::Admin));
        assert!(table.has_capability(&Identity::new("bob"), Capability::Admin));
        assert!(!table.has_capability(&Identity::new("carol"), Capability::Issuer));
    }

    #[test]
    fn null_identity_never_holds_capabilities() {
        let table = StaticCapabilities::from_grants([(Identity::null(), Capability::Issuer)]);

        assert!(!table.has_capability(&Identity::null(), Capability::Issuer));
        assert_eq!(table.holders(Capability::Issuer), 0);
    }

    #[test]
    fn revoke_removes_grant() {
        let table = StaticCapabilities::new().with_grant("alice", Capability::Pauser);

        assert!(table.revoke(&Identity::new("alice"), Capability::Pauser));
        assert!(!table.revoke(&Identity::new("alice"), Capability::Pauser));
        assert!(!table.has_capability(&Identity::new("alice"), Capability::Pauser));
    }
}
