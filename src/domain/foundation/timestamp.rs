//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC, second precision for registry math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix seconds, or `None` when chrono cannot
    /// represent it.
    pub fn try_from_unix_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Values outside chrono's range clamp to the nearest representable
    /// instant. Use [`Timestamp::try_from_unix_secs`] for untrusted input.
    pub fn from_unix_secs(secs: i64) -> Self {
        Self::try_from_unix_secs(secs).unwrap_or(if secs < 0 {
            Self(DateTime::<Utc>::MIN_UTC)
        } else {
            Self(DateTime::<Utc>::MAX_UTC)
        })
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Adds seconds, returning `None` if the result is not representable.
    pub fn checked_plus_secs(&self, secs: u64) -> Option<Self> {
        // chrono::Duration::seconds panics beyond i64::MAX milliseconds
        if secs > (i64::MAX / 1_000) as u64 {
            return None;
        }
        self.0
            .checked_add_signed(Duration::seconds(secs as i64))
            .map(Self)
    }
}
