//! SessionCommandHandler - applies a command, recomputes, publishes.
//!
//! Every command produces a new session. The ranking is recomputed from
//! scratch afterwards and announced with a `RankingComputed` event.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{AnalysisResult, RankingComputed};
use crate::domain::foundation::DomainError;
use crate::domain::matrix::IndexMapping;
use crate::domain::scale::TermDraft;
use crate::domain::session::Session;
use crate::ports::EventPublisher;

/// A user edit to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionCommand {
    SetCriteriaComparison {
        i: usize,
        j: usize,
        intensity: f64,
    },
    SetAlternativeComparison {
        criterion: usize,
        i: usize,
        j: usize,
        intensity: f64,
    },
    AddCriterion {
        name: String,
    },
    InsertCriterion {
        at: usize,
        name: String,
    },
    RemoveCriterion {
        index: usize,
    },
    RenameCriterion {
        index: usize,
        name: String,
    },
    /// Explicit mapping: `old_to_new[i]` is the new index of criterion `i`.
    ResizeCriteria {
        old_to_new: Vec<Option<usize>>,
        names: Vec<String>,
    },
    AddAlternative {
        name: String,
    },
    InsertAlternative {
        at: usize,
        name: String,
    },
    RemoveAlternative {
        index: usize,
    },
    RenameAlternative {
        index: usize,
        name: String,
    },
    ResizeAlternatives {
        old_to_new: Vec<Option<usize>>,
        names: Vec<String>,
    },
    UpdateTermSet {
        terms: Vec<TermDraft>,
    },
    RefreshCells,
    Recompute,
}

impl SessionCommand {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetCriteriaComparison { .. } => "set_criteria_comparison",
            Self::SetAlternativeComparison { .. } => "set_alternative_comparison",
            Self::AddCriterion { .. } => "add_criterion",
            Self::InsertCriterion { .. } => "insert_criterion",
            Self::RemoveCriterion { .. } => "remove_criterion",
            Self::RenameCriterion { .. } => "rename_criterion",
            Self::ResizeCriteria { .. } => "resize_criteria",
            Self::AddAlternative { .. } => "add_alternative",
            Self::InsertAlternative { .. } => "insert_alternative",
            Self::RemoveAlternative { .. } => "remove_alternative",
            Self::RenameAlternative { .. } => "rename_alternative",
            Self::ResizeAlternatives { .. } => "resize_alternatives",
            Self::UpdateTermSet { .. } => "update_term_set",
            Self::RefreshCells => "refresh_cells",
            Self::Recompute => "recompute",
        }
    }

    /// Applies the command to `session`, returning the new session.
    pub fn apply(self, session: &Session) -> Result<Session, DomainError> {
        match self {
            Self::SetCriteriaComparison { i, j, intensity } => {
                session.set_criteria_comparison(i, j, intensity)
            }
            Self::SetAlternativeComparison {
                criterion,
                i,
                j,
                intensity,
            } => session.set_alternative_comparison(criterion, i, j, intensity),
            Self::AddCriterion { name } => session.add_criterion(name),
            Self::InsertCriterion { at, name } => session.insert_criterion(at, name),
            Self::RemoveCriterion { index } => session.remove_criterion(index),
            Self::RenameCriterion { index, name } => session.rename_criterion(index, name),
            Self::ResizeCriteria { old_to_new, names } => {
                let mapping = IndexMapping::new(old_to_new, names.len())?;
                session.resize_criteria(&mapping, names)
            }
            Self::AddAlternative { name } => session.add_alternative(name),
            Self::InsertAlternative { at, name } => session.insert_alternative(at, name),
            Self::RemoveAlternative { index } => session.remove_alternative(index),
            Self::RenameAlternative { index, name } => session.rename_alternative(index, name),
            Self::ResizeAlternatives { old_to_new, names } => {
                let mapping = IndexMapping::new(old_to_new, names.len())?;
                session.resize_alternatives(&mapping, names)
            }
            Self::UpdateTermSet { terms } => Ok(session.update_term_set(terms)?),
            Self::RefreshCells => Ok(session.refresh_cells()),
            Self::Recompute => Ok(session.clone()),
        }
    }
}

/// Result of a successfully applied command.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub session: Session,
    /// `None` when the session is structurally inconsistent.
    pub result: Option<AnalysisResult>,
    pub event: Option<RankingComputed>,
}

/// Handler for session commands.
pub struct SessionCommandHandler {
    event_publisher: Arc<dyn EventPublisher>,
}

impl SessionCommandHandler {
    pub fn new(event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self { event_publisher }
    }

    /// Applies `cmd` to `session` and recomputes the ranking.
    ///
    /// # Errors
    ///
    /// Any command error; the caller keeps its previous session. A
    /// structurally inconsistent session is not an error here: the outcome
    /// simply carries no result.
    pub fn handle(&self, session: &Session, cmd: SessionCommand) -> Result<CommandOutcome, DomainError> {
        let command = cmd.name();

        // 1. Apply command
        let session = cmd.apply(session).map_err(|err| {
            tracing::debug!(command, error = %err, "command rejected");
            err
        })?;

        // 2. Recompute from scratch
        let result = match session.compute() {
            Ok(result) => Some(result),
            Err(err) if err.is_structural() => None,
            Err(err) => return Err(err),
        };

        // 3. Publish event
        let event = match &result {
            Some(result) => {
                let event = RankingComputed::from_result(*session.id(), result);
                self.event_publisher.publish(&event)?;
                Some(event)
            }
            None => None,
        };

        tracing::debug!(command, session_id = %session.id(), "command applied");
        Ok(CommandOutcome {
            session,
            result,
            event,
        })
    }
}
