//! Pause switch backing the operational gate.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::ports::{OperationalGate, PauseControl};

/// Process-wide pause flag.
#[derive(Debug, Default)]
pub struct PauseSwitch {
    paused: AtomicBool,
}

impl PauseSwitch {
    /// Creates a switch in the running state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a switch that starts paused.
    pub fn paused() -> Self {
        Self {
            paused: AtomicBool::new(true),
        }
    }
}

impl OperationalGate for PauseSwitch {
    fn is_operational(&self) -> bool {
        !self.paused.load(Ordering::SeqCst)
    }
}

impl PauseControl for PauseSwitch {
    fn pause(&self) -> bool {
        !self.paused.swap(true, Ordering::SeqCst)
    }

    fn unpause(&self) -> bool {
        self.paused.swap(false, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_and_unpause_report_changes() {
        let switch = PauseSwitch::new();
        assert!(switch.is_operational());

        assert!(switch.pause());
        assert!(!switch.pause());
        assert!(!switch.is_operational());

        assert!(switch.unpause());
        assert!(!switch.unpause());
        assert!(switch.is_operational());
    }

    #[test]
    fn paused_constructor_starts_closed() {
        assert!(!PauseSwitch::paused().is_operational());
    }
}
