//! Builds the initial session from configuration.

use crate::config::EngineConfig;
use crate::domain::foundation::DomainError;
use crate::domain::session::Session;

/// Creates a session with the configured names, term table and threshold.
///
/// # Errors
///
/// - `InvalidTermSet` if the term table override is rejected
/// - `ValidationFailed` for blank names or an out-of-range threshold
pub fn bootstrap_session(config: &EngineConfig) -> Result<Session, DomainError> {
    let terms = config.term_set()?;
    let session = Session::new(config.criteria.clone(), config.alternatives.clone(), terms)?
        .with_consistency_threshold(config.consistency_threshold)?;

    tracing::debug!(
        session_id = %session.id(),
        criteria = session.criteria().len(),
        alternatives = session.alternatives().len(),
        terms = session.terms().len(),
        "session created"
    );
    Ok(session)
}
