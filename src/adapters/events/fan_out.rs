//! Publisher that forwards each event to several sinks in order.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// Forwards every event to each inner publisher, stopping at the first error.
#[derive(Clone, Default)]
pub struct FanOutPublisher {
    sinks: Vec<Arc<dyn EventPublisher>>,
}

impl FanOutPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sink. Sinks receive events in the order they were added.
    pub fn with_sink(mut self, sink: Arc<dyn EventPublisher>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl EventPublisher for FanOutPublisher {
    fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        for sink in &self.sinks {
            sink.publish(event.clone())?;
        }
        Ok(())
    }
}
