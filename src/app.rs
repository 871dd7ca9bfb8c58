//! Application wiring.
//!
//! Builds the registry and its collaborators from configuration. Shared by
//! the binary and the integration tests, which swap in a manual clock.

use std::sync::Arc;

use crate::adapters::auth::StaticCapabilities;
use crate::adapters::events::{FanOutPublisher, InMemoryEventLog, TracingEventPublisher};
use crate::adapters::gate::PauseSwitch;
use crate::adapters::http::RegistryAppState;
use crate::application::{ExpirySweeper, ExpirySweeperConfig, SharedRegistry};
use crate::config::{RegistryConfig, ValidationError};
use crate::domain::membership::MembershipRegistry;
use crate::ports::Clock;

/// Fully wired application.
pub struct App {
    pub state: RegistryAppState,

    /// `None` when the sweep interval is configured as zero.
    pub sweeper: Option<ExpirySweeper>,
}

impl App {
    /// Wire the registry, its adapters and the sweeper.
    ///
    /// # Errors
    ///
    /// `ValidationError` if the tier validity table is invalid.
    pub fn build(config: &RegistryConfig, clock: Arc<dyn Clock>) -> Result<Self, ValidationError> {
        let tier_validity = config.tier_validity()?;
        let capabilities = Arc::new(StaticCapabilities::from_grants(config.capability_grants()));
        let pause_switch = Arc::new(if config.start_paused {
            PauseSwitch::paused()
        } else {
            PauseSwitch::new()
        });
        let event_log = Arc::new(InMemoryEventLog::with_capacity(config.event_log_capacity));
        let publisher = FanOutPublisher::new()
            .with_sink(event_log.clone())
            .with_sink(Arc::new(TracingEventPublisher::new()));

        let registry = MembershipRegistry::new(
            tier_validity,
            capabilities.clone(),
            pause_switch.clone(),
            clock,
        );
        let registry = Arc::new(SharedRegistry::new(registry, Arc::new(publisher)));

        let sweeper = config.expiry_sweep_interval().map(|interval| {
            ExpirySweeper::with_config(
                registry.clone(),
                ExpirySweeperConfig::default()
                    .with_interval(interval)
                    .with_batch_size(config.expiry_sweep_batch_size),
            )
        });

        Ok(Self {
            state: RegistryAppState {
                registry,
                capabilities,
                pause_switch,
                event_log,
            },
            sweeper,
        })
    }
}
