//! The result bundle handed to the presentation layer.

use serde::Serialize;

use super::{ConsistencyCheck, ConsistencyReport, DerivedWeights, RankedAlternative, WeightDerivation};
use crate::domain::matrix::ReciprocalMatrix;

/// Derived weights plus consistency of a single matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixAnalysis {
    pub weights: DerivedWeights,
    pub consistency: ConsistencyReport,
}

impl MatrixAnalysis {
    /// Runs the weight derivation and the consistency check on `matrix`.
    pub fn of(matrix: &ReciprocalMatrix, consistency_threshold: f64) -> Self {
        Self {
            weights: WeightDerivation::derive(matrix),
            consistency: ConsistencyCheck::evaluate(matrix, consistency_threshold),
        }
    }
}

/// Analysis of the alternatives under one criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionAlternatives {
    pub criterion_index: usize,
    pub criterion: String,
    pub analysis: MatrixAnalysis,
}

/// Everything computed from a session: per-level artifacts, global scores
/// and the ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub criteria: Vec<String>,
    pub alternatives: Vec<String>,
    pub criteria_analysis: MatrixAnalysis,
    pub alternative_analyses: Vec<CriterionAlternatives>,
    pub global_scores: Vec<f64>,
    pub ranking: Vec<RankedAlternative>,
}

impl AnalysisResult {
    /// The top-ranked alternative, if any.
    pub fn best(&self) -> Option<&RankedAlternative> {
        self.ranking.first()
    }

    /// Number of matrices whose consistency ratio exceeds the threshold.
    pub fn inconsistent_matrices(&self) -> usize {
        std::iter::once(&self.criteria_analysis)
            .chain(self.alternative_analyses.iter().map(|c| &c.analysis))
            .filter(|a| !a.consistency.acceptable)
            .count()
    }

    /// Returns true if any derivation hit the zero-denominator guard.
    pub fn has_degenerate_weights(&self) -> bool {
        self.criteria_analysis.weights.degenerate
            || self
                .alternative_analyses
                .iter()
                .any(|c| c.analysis.weights.degenerate)
    }
}
