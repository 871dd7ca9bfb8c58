//! Operational gate adapters.

mod pause_switch;

pub use pause_switch::PauseSwitch;
