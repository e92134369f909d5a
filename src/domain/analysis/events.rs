//! Analysis domain events.
//!
//! Published when a computation completes, so a presentation layer or an
//! audit trail can react without re-reading the whole result bundle.

use serde::{Deserialize, Serialize};

use super::AnalysisResult;
use crate::domain::foundation::{EventId, SessionId, Timestamp};

/// A ranking entry as carried by events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub score: f64,
    pub rank: usize,
}

/// Published when a session's ranking is (re)computed.
///
/// Contains summarized results, not raw matrices, to keep payload size
/// manageable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingComputed {
    /// Unique event identifier for deduplication.
    pub event_id: EventId,
    /// The session the ranking belongs to.
    pub session_id: SessionId,
    /// Alternatives by descending global score.
    pub ranking: Vec<RankingEntry>,
    /// Matrices whose consistency ratio exceeds the threshold.
    pub inconsistent_matrices: usize,
    /// True if any weight vector hit the zero-denominator guard.
    pub degenerate: bool,
    /// When the ranking was computed.
    pub computed_at: Timestamp,
}

impl RankingComputed {
    /// Summarizes a result bundle.
    pub fn from_result(session_id: SessionId, result: &AnalysisResult) -> Self {
        Self {
            event_id: EventId::new(),
            session_id,
            ranking: result
                .ranking
                .iter()
                .map(|r| RankingEntry {
                    name: r.name.clone(),
                    score: r.score,
                    rank: r.rank,
                })
                .collect(),
            inconsistent_matrices: result.inconsistent_matrices(),
            degenerate: result.has_degenerate_weights(),
            computed_at: Timestamp::now(),
        }
    }

    /// The event type string used for routing.
    pub fn event_type(&self) -> &'static str {
        "analysis.ranking_computed"
    }

    /// Name of the top-ranked alternative.
    pub fn winner(&self) -> Option<&str> {
        self.ranking.first().map(|r| r.name.as_str())
    }
}
