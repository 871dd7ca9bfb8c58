//! Registry configuration
//!
//! Tier validity defaults, capability grants, the initial pause state and
//! expiry sweeper tuning.

use serde::Deserialize;
use std::time::Duration;

use crate::domain::foundation::{Capability, Identity};
use crate::domain::membership::{Tier, TierValidity, MAX_TIER_VALIDITY_SECS};

use super::error::ValidationError;

const DAY_SECS: u64 = 86_400;

/// Registry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Default validity per tier, in seconds
    #[serde(default = "default_bronze_validity")]
    pub bronze_validity_secs: u64,

    #[serde(default = "default_silver_validity")]
    pub silver_validity_secs: u64,

    #[serde(default = "default_gold_validity")]
    pub gold_validity_secs: u64,

    #[serde(default = "default_platinum_validity")]
    pub platinum_validity_secs: u64,

    #[serde(default = "default_diamond_validity")]
    pub diamond_validity_secs: u64,

    /// Identities allowed to issue and revoke (comma-separated)
    pub issuers: Option<String>,

    /// Identities allowed to change tier validity (comma-separated)
    pub admins: Option<String>,

    /// Identities allowed to pause the registry (comma-separated)
    pub pausers: Option<String>,

    /// Identities allowed to report custody transfers (comma-separated)
    pub ledgers: Option<String>,

    /// Start with membership movements paused
    #[serde(default)]
    pub start_paused: bool,

    /// Seconds between expiry sweeps; 0 disables the sweeper
    #[serde(default = "default_sweep_interval")]
    pub expiry_sweep_interval_secs: u64,

    /// Maximum memberships expired per sweep
    #[serde(default = "default_sweep_batch_size")]
    pub expiry_sweep_batch_size: usize,

    /// Number of events retained for `GET /api/events`
    #[serde(default = "default_event_log_capacity")]
    pub event_log_capacity: usize,
}

impl RegistryConfig {
    /// Tier durations in rank order.
    fn durations(&self) -> [(Tier, u64); 5] {
        [
            (Tier::Bronze, self.bronze_validity_secs),
            (Tier::Silver, self.silver_validity_secs),
            (Tier::Gold, self.gold_validity_secs),
            (Tier::Platinum, self.platinum_validity_secs),
            (Tier::Diamond, self.diamond_validity_secs),
        ]
    }

    /// Build the tier validity table.
    pub fn tier_validity(&self) -> Result<TierValidity, ValidationError> {
        let durations = self.durations().map(|(_, secs)| secs);
        TierValidity::new(durations).map_err(|e| {
            let tier = self
                .durations()
                .into_iter()
                .find(|(_, secs)| *secs == 0 || *secs > MAX_TIER_VALIDITY_SECS)
                .map(|(tier, _)| tier.display_name())
                .unwrap_or("unknown");
            ValidationError::InvalidTierValidity {
                tier,
                reason: e.message(),
            }
        })
    }

    /// Every `(identity, capability)` grant listed in configuration.
    pub fn capability_grants(&self) -> Vec<(Identity, Capability)> {
        [
            (&self.issuers, Capability::Issuer),
            (&self.admins, Capability::Admin),
            (&self.pausers, Capability::Pauser),
            (&self.ledgers, Capability::Ledger),
        ]
        .into_iter()
        .flat_map(|(list, capability)| {
            identity_list(list.as_deref())
                .into_iter()
                .map(move |identity| (identity, capability))
        })
        .collect()
    }

    /// Sweep interval, or `None` when the sweeper is disabled.
    pub fn expiry_sweep_interval(&self) -> Option<Duration> {
        (self.expiry_sweep_interval_secs > 0)
            .then(|| Duration::from_secs(self.expiry_sweep_interval_secs))
    }

    /// Validate registry configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        self.tier_validity()?;
        if self.expiry_sweep_batch_size == 0 {
            return Err(ValidationError::InvalidSweepBatchSize);
        }
        if production {
            if identity_list(self.issuers.as_deref()).is_empty() {
                return Err(ValidationError::MissingRequired("registry.issuers"));
            }
            if identity_list(self.admins.as_deref()).is_empty() {
                return Err(ValidationError::MissingRequired("registry.admins"));
            }
        }
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            bronze_validity_secs: default_bronze_validity(),
            silver_validity_secs: default_silver_validity(),
            gold_validity_secs: default_gold_validity(),
            platinum_validity_secs: default_platinum_validity(),
            diamond_validity_secs: default_diamond_validity(),
            issuers: None,
            admins: None,
            pausers: None,
            ledgers: None,
            start_paused: false,
            expiry_sweep_interval_secs: default_sweep_interval(),
            expiry_sweep_batch_size: default_sweep_batch_size(),
            event_log_capacity: default_event_log_capacity(),
        }
    }
}

fn identity_list(list: Option<&str>) -> Vec<Identity> {
    list.map(|s| {
        s.split(',')
            .map(Identity::new)
            .filter(|identity| !identity.is_null())
            .collect()
    })
    .unwrap_or_default()
}

fn default_bronze_validity() -> u64 {
    30 * DAY_SECS
}

fn default_silver_validity() -> u64 {
    90 * DAY_SECS
}

fn default_gold_validity() -> u64 {
    180 * DAY_SECS
}

fn default_platinum_validity() -> u64 {
    365 * DAY_SECS
}

fn default_diamond_validity() -> u64 {
    730 * DAY_SECS
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_sweep_batch_size() -> usize {
    500
}

fn default_event_log_capacity() -> usize {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_domain_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.tier_validity().unwrap(), TierValidity::default());
        assert!(!config.start_paused);
        assert_eq!(config.expiry_sweep_interval(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_zero_tier_validity_rejected() {
        let config = RegistryConfig {
            gold_validity_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(false),
            Err(ValidationError::InvalidTierValidity { tier: "Gold", .. })
        ));
    }

    #[test]
    fn test_capability_grants_parse_lists() {
        let config = RegistryConfig {
            issuers: Some("alice, bob".to_string()),
            admins: Some("carol".to_string()),
            pausers: Some(" ,".to_string()),
            ledgers: None,
            ..Default::default()
        };

        let grants = config.capability_grants();

        assert_eq!(
            grants,
            vec![
                (Identity::new("alice"), Capability::Issuer),
                (Identity::new("bob"), Capability::Issuer),
                (Identity::new("carol"), Capability::Admin),
            ]
        );
    }

    #[test]
    fn test_production_requires_issuers_and_admins() {
        let config = RegistryConfig::default();
        assert!(config.validate(false).is_ok());
        assert_eq!(
            config.validate(true),
            Err(ValidationError::MissingRequired("registry.issuers"))
        );

        let config = RegistryConfig {
            issuers: Some("alice".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.validate(true),
            Err(ValidationError::MissingRequired("registry.admins"))
        );
    }

    #[test]
    fn test_zero_interval_disables_sweeper() {
        let config = RegistryConfig {
            expiry_sweep_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.expiry_sweep_interval(), None);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = RegistryConfig {
            expiry_sweep_batch_size: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(false), Err(ValidationError::InvalidSweepBatchSize));
    }
}
