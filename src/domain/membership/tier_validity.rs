//! Default validity duration per tier.
//!
//! A fixed-size table indexed by [`Tier::rank`]. Durations are whole
//! seconds and always positive.

use serde::{Deserialize, Serialize};

use super::{MembershipError, Tier};

const DAY_SECS: u64 = 86_400;

/// Upper bound on a tier duration (100 years), keeping expiry math in range.
pub const MAX_TIER_VALIDITY_SECS: u64 = 100 * 365 * DAY_SECS;

/// Tier → default validity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierValidity([u64; 5]);

impl TierValidity {
    /// Builds a table from explicit durations, lowest tier first.
    ///
    /// # Errors
    ///
    /// `InvalidDuration` if any entry is zero or above the maximum.
    pub fn new(durations: [u64; 5]) -> Result<Self, MembershipError> {
        for secs in durations {
            Self::validate(secs as i128)?;
        }
        Ok(Self(durations))
    }

    /// Returns the validity for a tier, in seconds.
    pub fn get(&self, tier: Tier) -> u64 {
        self.0[tier.rank()]
    }

    /// Replaces the validity for a tier, returning the previous value.
    ///
    /// # Errors
    ///
    /// `InvalidDuration` if `secs` is not positive or exceeds the maximum.
    pub fn set(&mut self, tier: Tier, secs: i64) -> Result<u64, MembershipError> {
        let secs = Self::validate(secs as i128)?;
        let previous = self.0[tier.rank()];
        self.0[tier.rank()] = secs;
        Ok(previous)
    }

    /// Iterates `(tier, seconds)` pairs, lowest tier first.
    pub fn entries(&self) -> impl Iterator<Item = (Tier, u64)> + '_ {
        Tier::ALL.into_iter().map(move |t| (t, self.get(t)))
    }

    fn validate(secs: i128) -> Result<u64, MembershipError> {
        if secs <= 0 || secs > MAX_TIER_VALIDITY_SECS as i128 {
            return Err(MembershipError::invalid_duration(secs));
        }
        Ok(secs as u64)
    }
}

impl Default for TierValidity {
    /// Bronze 30d, Silver 90d, Gold 180d, Platinum 365d, Diamond 730d.
    fn default() -> Self {
        Self([
            30 * DAY_SECS,
            90 * DAY_SECS,
            180 * DAY_SECS,
            365 * DAY_SECS,
            730 * DAY_SECS,
        ])
    }
}
