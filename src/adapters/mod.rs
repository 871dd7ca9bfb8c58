//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the registry to the outside world:
//! - `auth` - Capability table
//! - `clock` - System and manual clocks
//! - `events` - Event log and audit sinks
//! - `gate` - Pause switch
//! - `http` - Axum REST API

pub mod auth;
pub mod clock;
pub mod events;
pub mod gate;
pub mod http;

pub use auth::StaticCapabilities;
pub use clock::{ManualClock, SystemClock};
pub use events::{FanOutPublisher, InMemoryEventLog, TracingEventPublisher};
pub use gate::PauseSwitch;
