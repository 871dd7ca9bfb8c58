//! Clock adapters.
//!
//! - `SystemClock` - Wall-clock time
//! - `ManualClock` - Explicitly advanced time for tests

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;
