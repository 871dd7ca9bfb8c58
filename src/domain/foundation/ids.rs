//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Numeric identifier for a membership record.
///
/// Ids are assigned from a monotonic counter starting at 1. The value 0 is
/// reserved as the "no membership" sentinel and is never assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MembershipId(u64);

impl MembershipId {
    /// The "no membership" sentinel.
    pub const NONE: MembershipId = MembershipId(0);

    /// The first id handed out by a fresh registry.
    pub const FIRST: MembershipId = MembershipId(1);

    /// Creates a MembershipId from its raw value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns true if this is the sentinel id.
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// Returns the id following this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for MembershipId {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for MembershipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MembershipId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Identity of a holder, issuer or operator (an account address).
///
/// The empty string and the all-zero address are both treated as the
/// null identity, which can never receive a membership.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Creates an identity from any string. Surrounding whitespace is trimmed.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.len() == id.len() {
            Self(id)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The null identity.
    pub fn null() -> Self {
        Self(String::new())
    }

    /// Returns true for the empty identity or an all-zero address such as `0x0000...`.
    pub fn is_null(&self) -> bool {
        let digits = self.0.strip_prefix("0x").unwrap_or(&self.0);
        digits.is_empty() || (self.0.starts_with("0x") && digits.bytes().all(|b| b == b'0'))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
