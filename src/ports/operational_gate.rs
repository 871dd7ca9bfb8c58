//! Operational gate port (the pause flag).
//!
//! Checked before any mutation that moves a membership: issue, revoke and
//! custody transfer. Expiry checks and tier configuration stay available
//! while paused.
//!
//! The registry only reads the gate. `PauseControl` is the write side used by
//! the pause command.

/// Port reporting whether the registry accepts membership movements.
pub trait OperationalGate: Send + Sync {
    /// Returns false while the registry is paused.
    fn is_operational(&self) -> bool;
}

/// Port for flipping the pause flag.
pub trait PauseControl: OperationalGate {
    /// Pauses the registry. Returns true if it was running.
    fn pause(&self) -> bool;

    /// Resumes the registry. Returns true if it was paused.
    fn unpause(&self) -> bool;

    fn is_paused(&self) -> bool {
        !self.is_operational()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysOpen;

    impl OperationalGate for AlwaysOpen {
        fn is_operational(&self) -> bool {
            true
        }
    }

    #[test]
    fn operational_gate_is_object_safe() {
        let gate: &dyn OperationalGate = &AlwaysOpen;
        assert!(gate.is_operational());
    }

    struct Flag(std::sync::atomic::AtomicBool);

    impl OperationalGate for Flag {
        fn is_operational(&self) -> bool {
            !self.0.load(std::sync::atomic::Ordering::SeqCst)
        }
    }

    impl PauseControl for Flag {
        fn pause(&self) -> bool {
            !self.0.swap(true, std::sync::atomic::Ordering::SeqCst)
        }

        fn unpause(&self) -> bool {
            self.0.swap(false, std::sync::atomic::Ordering::SeqCst)
        }
    }

    #[test]
    fn is_paused_defaults_to_inverse_of_gate() {
        let control: &dyn PauseControl = &Flag(Default::default());
        assert!(!control.is_paused());
        assert!(control.pause());
        assert!(control.is_paused());
    }
}
