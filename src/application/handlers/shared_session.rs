//! SharedSession - a session that several threads can read and edit.
//!
//! Command application and recomputation run under one write lock, so
//! readers never observe a half-applied edit.

use std::sync::RwLock;

use super::{CommandOutcome, SessionCommand, SessionCommandHandler};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::session::Session;

/// A session behind a read-write lock.
#[derive(Debug)]
pub struct SharedSession {
    inner: RwLock<Session>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: RwLock::new(session),
        }
    }

    /// Returns a copy of the current session.
    pub fn snapshot(&self) -> Result<Session, DomainError> {
        self.inner
            .read()
            .map(|session| session.clone())
            .map_err(|_| poisoned())
    }

    /// Applies `cmd` atomically. On error the stored session is unchanged.
    pub fn execute(
        &self,
        handler: &SessionCommandHandler,
        cmd: SessionCommand,
    ) -> Result<CommandOutcome, DomainError> {
        let mut current = self.inner.write().map_err(|_| poisoned())?;
        let outcome = handler.handle(&current, cmd)?;
        *current = outcome.session.clone();
        Ok(outcome)
    }
}

fn poisoned() -> DomainError {
    DomainError::new(ErrorCode::InternalError, "session lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryEventLog;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn failed_command_keeps_previous_state() {
        let shared = SharedSession::new(Session::default());
        let handler = SessionCommandHandler::new(Arc::new(InMemoryEventLog::new()));
        let before = shared.snapshot().unwrap();

        let result = shared.execute(&handler, SessionCommand::RemoveCriterion { index: 7 });

        assert!(result.is_err());
        assert_eq!(shared.snapshot().unwrap(), before);
    }

    #[test]
    fn concurrent_edits_are_all_applied() {
        let shared = Arc::new(SharedSession::new(Session::default()));
        let log = Arc::new(InMemoryEventLog::new());
        let handler = Arc::new(SessionCommandHandler::new(log.clone()));

        let workers: Vec<_> = (0..4)
            .map(|n| {
                let shared = Arc::clone(&shared);
                let handler = Arc::clone(&handler);
                thread::spawn(move || {
                    shared
                        .execute(
                            &handler,
                            SessionCommand::AddAlternative {
                                name: format!("Extra {}", n),
                            },
                        )
                        .unwrap();
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let session = shared.snapshot().unwrap();
        assert_eq!(session.alternatives().len(), 6);
        assert!(session.alternative_matrices().iter().all(|m| m.size() == 6));
        assert_eq!(log.event_count(), 4);
    }
}
