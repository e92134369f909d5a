//! Adapters - Implementations of the ports.

pub mod events;

pub use events::{InMemoryEventLog, TracingEventPublisher};
