//! Wall-clock time source.

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Reads the system clock, truncated to whole seconds.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_unix_secs(Timestamp::now().as_unix_secs())
    }
}
