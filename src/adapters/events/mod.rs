//! Event publisher adapters.

mod in_memory;
mod tracing_publisher;

pub use in_memory::InMemoryEventLog;
pub use tracing_publisher::TracingEventPublisher;
