//! Publishes analysis events to the tracing pipeline as JSON payloads.

use crate::domain::analysis::RankingComputed;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::EventPublisher;

/// Emits each event as an `info` record carrying the serialized payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

impl EventPublisher for TracingEventPublisher {
    fn publish(&self, event: &RankingComputed) -> Result<(), DomainError> {
        let payload = serde_json::to_string(event).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize event: {}", e),
            )
        })?;

        tracing::info!(
            event_type = event.event_type(),
            event_id = %event.event_id,
            session_id = %event.session_id,
            payload = %payload,
            "event published"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::Session;

    #[test]
    fn publish_succeeds_without_subscriber() {
        let session = Session::default();
        let result = session.compute().unwrap();
        let event = RankingComputed::from_result(*session.id(), &result);
        assert!(TracingEventPublisher::new().publish(&event).is_ok());
    }
}
