//! PauseRegistryHandler - Pauses or resumes membership movements.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{Capability, Identity};
use crate::domain::membership::MembershipError;
use crate::ports::{CapabilityChecker, PauseControl};

/// Command to set the pause flag.
#[derive(Debug, Clone)]
pub struct PauseRegistryCommand {
    pub caller: Identity,
    pub paused: bool,
}

/// Result of a pause/unpause request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseRegistryResult {
    pub paused: bool,

    /// False if the registry was already in the requested state.
    pub changed: bool,
}

/// Handler for the pause switch.
pub struct PauseRegistryHandler {
    switch: Arc<dyn PauseControl>,
    capabilities: Arc<dyn CapabilityChecker>,
}

impl PauseRegistryHandler {
    pub fn new(switch: Arc<dyn PauseControl>, capabilities: Arc<dyn CapabilityChecker>) -> Self {
        Self {
            switch,
            capabilities,
        }
    }

    pub fn handle(&self, cmd: PauseRegistryCommand) -> Result<PauseRegistryResult, MembershipError> {
        if !self
            .capabilities
            .has_capability(&cmd.caller, Capability::Pauser)
        {
            warn!(caller = %cmd.caller, paused = cmd.paused, "Pause request rejected");
            return Err(MembershipError::unauthorized(cmd.caller, Capability::Pauser));
        }

        let changed = if cmd.paused {
            self.switch.pause()
        } else {
            self.switch.unpause()
        };
        if changed {
            info!(caller = %cmd.caller, paused = cmd.paused, "Registry pause state changed");
        }

        Ok(PauseRegistryResult {
            paused: self.switch.is_paused(),
            changed,
        })
    }
}
