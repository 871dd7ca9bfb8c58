//! Capabilities checked before privileged registry operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// An authorization role held by an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// May issue and revoke memberships.
    Issuer,

    /// May change tier validity durations.
    Admin,

    /// May pause and unpause the registry.
    Pauser,

    /// The ownership ledger; may report custody transfers.
    Ledger,
}

impl Capability {
    /// All capabilities, in declaration order.
    pub const ALL: [Capability; 4] = [
        Capability::Issuer,
        Capability::Admin,
        Capability::Pauser,
        Capability::Ledger,
    ];

    /// Returns the lowercase name used in configuration and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Issuer => "issuer",
            Capability::Admin => "admin",
            Capability::Pauser => "pauser",
            Capability::Ledger => "ledger",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Capability {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::invalid_format("capability", format!("unknown capability '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Issuer".parse::<Capability>(), Ok(Capability::Issuer));
        assert_eq!(" ledger ".parse::<Capability>(), Ok(Capability::Ledger));
        assert!("owner".parse::<Capability>().is_err());
    }

    #[test]
    fn display_matches_serde_name() {
        for cap in Capability::ALL {
            let json = serde_json::to_string(&cap).unwrap();
            assert_eq!(json, format!("\"{}\"", cap));
        }
    }
}
