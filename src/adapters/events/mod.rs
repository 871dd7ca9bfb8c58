//! Event publisher adapters.
//!
//! - `InMemoryEventLog` - Bounded in-process audit log
//! - `TracingEventPublisher` - Structured log line per event
//! - `FanOutPublisher` - Forwards to several sinks

mod fan_out;
mod in_memory;
mod tracing_publisher;

pub use fan_out::FanOutPublisher;
pub use in_memory::InMemoryEventLog;
pub use tracing_publisher::TracingEventPublisher;
