//! ExpirySweeper - Background service that deactivates lapsed memberships.
//!
//! Expiry is otherwise lazy: a membership past its deadline stays active
//! until somebody calls the permissionless expiry check. The sweeper does
//! that on a timer so stored status converges with wall-clock validity.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 60s | How often to scan for lapsed memberships |
//! | `batch_size` | 500 | Max memberships expired per scan |
//!
//! ## Graceful Shutdown
//!
//! The service listens for a shutdown signal and completes the current
//! batch before stopping.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{debug, info, warn};

use crate::domain::membership::MembershipError;

use super::SharedRegistry;

/// Configuration for the ExpirySweeper service.
#[derive(Debug, Clone)]
pub struct ExpirySweeperConfig {
    /// How often to scan.
    pub interval: Duration,

    /// Maximum memberships to expire per scan.
    pub batch_size: usize,
}

impl Default for ExpirySweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            batch_size: 500,
        }
    }
}

impl ExpirySweeperConfig {
    /// Create config with custom scan interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Create config with custom batch size.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }
}

/// Background service that expires lapsed memberships.
pub struct ExpirySweeper {
    registry: Arc<SharedRegistry>,
    config: ExpirySweeperConfig,
}

impl ExpirySweeper {
    /// Create a new sweeper with default configuration.
    pub fn new(registry: Arc<SharedRegistry>) -> Self {
        Self::with_config(registry, ExpirySweeperConfig::default())
    }

    /// Create a new sweeper with custom configuration.
    pub fn with_config(registry: Arc<SharedRegistry>, config: ExpirySweeperConfig) -> Self {
        Self { registry, config }
    }

    /// Run the sweep loop until shutdown signal is received.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), MembershipError> {
        let mut interval = time::interval(self.config.interval);
        info!(
            interval_secs = self.config.interval.as_secs(),
            batch_size = self.config.batch_size,
            "Expiry sweeper started"
        );

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        self.process_batch()?;
                        info!("Expiry sweeper stopped");
                        return Ok(());
                    }
                }

                _ = interval.tick() => {
                    self.process_batch()?;
                }
            }
        }
    }

    /// Expire up to `batch_size` lapsed memberships. Returns how many expired.
    ///
    /// A membership that vanished or changed between the scan and the
    /// expiry call is skipped.
    pub fn process_batch(&self) -> Result<usize, MembershipError> {
        let due = self
            .registry
            .read(|registry| registry.due_for_expiry(self.config.batch_size))?;
        if due.is_empty() {
            return Ok(0);
        }

        let mut expired = 0;
        for id in due {
            match self.registry.mutate(None, |registry| registry.check_and_expire(id)) {
                Ok((true, _)) => expired += 1,
                Ok((false, _)) => {}
                Err(MembershipError::NotFound(_)) => {
                    debug!(membership_id = %id, "Membership destroyed before sweep");
                }
                Err(e) => {
                    warn!(membership_id = %id, error = %e, "Expiry sweep failed");
                    return Err(e);
                }
            }
        }

        info!(expired, "Expiry sweep completed");
        Ok(expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::membership::test_support::{who, Harness};
    use crate::domain::membership::Tier;

    fn issue(h: &Harness, to: &str, tier: Tier) {
        let caller = who("issuer");
        h.registry
            .mutate(Some(&caller), |r| r.issue(&caller, &who(to), tier, None, "m"))
            .unwrap();
    }

    #[test]
    fn sweeps_only_lapsed_memberships() {
        let h = Harness::new();
        issue(&h, "a", Tier::Bronze);
        issue(&h, "b", Tier::Silver);
        issue(&h, "c", Tier::Bronze);
        h.clock.advance(30 * 86_400);
        let sweeper = ExpirySweeper::new(h.registry.clone());

        assert_eq!(sweeper.process_batch().unwrap(), 2);
        assert_eq!(sweeper.process_batch().unwrap(), 0);
        assert_eq!(h.events.events_of_type("badge.expired.v1").len(), 2);
        assert!(h.registry.read(|r| r.has_valid_membership(&who("b"))).unwrap());
    }

    #[test]
    fn batch_size_limits_each_scan() {
        let h = Harness::new();
        for owner in ["a", "b", "c"] {
            issue(&h, owner, Tier::Bronze);
        }
        h.clock.advance(30 * 86_400);
        let sweeper = ExpirySweeper::with_config(
            h.registry.clone(),
            ExpirySweeperConfig::default().with_batch_size(2),
        );

        assert_eq!(sweeper.process_batch().unwrap(), 2);
        assert_eq!(sweeper.process_batch().unwrap(), 1);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_after_final_batch() {
        let h = Harness::new();
        issue(&h, "a", Tier::Bronze);
        h.clock.advance(30 * 86_400);
        let sweeper = ExpirySweeper::with_config(
            h.registry.clone(),
            ExpirySweeperConfig::default().with_interval(Duration::from_secs(3_600)),
        );
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move { sweeper.run(rx).await });
        tx.send(true).unwrap();

        handle.await.unwrap().unwrap();
        assert_eq!(h.events.events_of_type("badge.expired.v1").len(), 1);
    }
}
