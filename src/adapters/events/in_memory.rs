//! In-memory event log.
//!
//! Keeps every published event for later inspection. Deterministic, so it
//! doubles as the publisher used in tests.

use std::sync::RwLock;

use crate::domain::analysis::RankingComputed;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::ports::EventPublisher;

/// In-memory event log.
///
/// # Example
///
/// ```ignore
/// let log = Arc::new(InMemoryEventLog::new());
/// let handler = SessionCommandHandler::new(log.clone());
/// handler.handle(&session, SessionCommand::Recompute)?;
/// assert_eq!(log.event_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    published: RwLock<Vec<RankingComputed>>,
}

impl InMemoryEventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    // === Inspection ===

    /// Returns all published events.
    pub fn published_events(&self) -> Vec<RankingComputed> {
        self.published
            .read()
            .map(|events| events.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Returns events for one session.
    pub fn events_for_session(&self, session_id: &SessionId) -> Vec<RankingComputed> {
        self.published_events()
            .into_iter()
            .filter(|e| &e.session_id == session_id)
            .collect()
    }

    /// The most recent event, if any.
    pub fn latest(&self) -> Option<RankingComputed> {
        self.published_events().pop()
    }

    /// Returns count of published events.
    pub fn event_count(&self) -> usize {
        self.published_events().len()
    }

    /// Clears all published events.
    pub fn clear(&self) {
        match self.published.write() {
            Ok(mut events) => events.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl EventPublisher for InMemoryEventLog {
    fn publish(&self, event: &RankingComputed) -> Result<(), DomainError> {
        self.published
            .write()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "event log lock poisoned"))?
            .push(event.clone());
        Ok(())
    }
}
