//! Ports - Interfaces between the application layer and the outside world.

mod event_publisher;

pub use event_publisher::EventPublisher;
