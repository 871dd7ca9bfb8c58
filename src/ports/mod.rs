//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the registry and the outside world. Adapters implement these ports.
//!
//! - `CapabilityChecker` - Issuer/admin/pauser/ledger role checks
//! - `Clock` - Current time
//! - `OperationalGate` / `PauseControl` - Pause flag (read / write)
//! - `EventPublisher` - Event/audit sink

mod capability_checker;
mod clock;
mod event_publisher;
mod operational_gate;

pub use capability_checker::CapabilityChecker;
pub use clock::Clock;
pub use event_publisher::EventPublisher;
pub use operational_gate::{OperationalGate, PauseControl};
