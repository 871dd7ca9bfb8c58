//! Time source port.
//!
//! The registry reads the current time once per operation and never
//! adjusts it. Tests drive time through a manual implementation.

use crate::domain::foundation::Timestamp;

/// Port for reading the current time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> Timestamp;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Frozen(Timestamp);

    impl Clock for Frozen {
        fn now(&self) -> Timestamp {
            self.0
        }
    }

    #[test]
    fn clock_is_object_safe() {
        let clock: Box<dyn Clock> = Box::new(Frozen(Timestamp::from_unix_secs(42)));
        assert_eq!(clock.now().as_unix_secs(), 42);
    }
}
