//! EventPublisher port - Interface for publishing analysis events.
//!
//! The application layer publishes `RankingComputed` without knowing where
//! it goes (an in-memory log, the tracing pipeline, ...).

use crate::domain::analysis::RankingComputed;
use crate::domain::foundation::DomainError;

/// Port for publishing analysis events.
///
/// Implementations must propagate delivery failures to the caller.
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    fn publish(&self, event: &RankingComputed) -> Result<(), DomainError>;
}
