//! Hierarchical Aggregator - global scores and ranking of alternatives.

use serde::Serialize;

use crate::domain::foundation::DomainError;

/// One row of the final ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAlternative {
    /// Position of the alternative in the input list.
    pub index: usize,
    pub name: String,
    pub score: f64,
    /// 1-based rank position.
    pub rank: usize,
}

/// Global scores and the ranking derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Synthesis {
    /// `global_scores[a]` in input order.
    pub global_scores: Vec<f64>,
    /// Alternatives by descending score.
    pub ranking: Vec<RankedAlternative>,
}

/// AHP synthesis across the two hierarchy levels.
pub struct HierarchicalAggregator;

impl HierarchicalAggregator {
    /// Combines criteria weights with per-criterion alternative weights.
    ///
    /// # Algorithm
    /// `score[a] = Σ_c criteria_weights[c] · alternative_weights[c][a]`,
    /// then a stable descending sort, so equal scores keep input order.
    ///
    /// # Errors
    ///
    /// `StructuralInconsistency` when there is not exactly one alternative
    /// vector per criterion, or a vector's length differs from the number of
    /// alternatives. Nothing is computed in that case.
    pub fn aggregate(
        criteria_weights: &[f64],
        alternative_weights: &[Vec<f64>],
        alternative_names: &[String],
    ) -> Result<Synthesis, DomainError> {
        if alternative_weights.len() != criteria_weights.len() {
            return Err(DomainError::structural(format!(
                "{} criteria weights but {} alternative weight vectors",
                criteria_weights.len(),
                alternative_weights.len()
            )));
        }

        let alternative_count = alternative_names.len();
        if let Some((criterion, weights)) = alternative_weights
            .iter()
            .enumerate()
            .find(|(_, w)| w.len() != alternative_count)
        {
            return Err(DomainError::structural(format!(
                "alternative weights for criterion {} have {} entries, expected {}",
                criterion,
                weights.len(),
                alternative_count
            ))
            .with_detail("criterion", criterion.to_string()));
        }

        let global_scores: Vec<f64> = (0..alternative_count)
            .map(|a| {
                criteria_weights
                    .iter()
                    .zip(alternative_weights)
                    .map(|(cw, aw)| cw * aw[a])
                    .sum()
            })
            .collect();

        let mut order: Vec<usize> = (0..alternative_count).collect();
        order.sort_by(|&a, &b| global_scores[b].total_cmp(&global_scores[a]));

        let ranking = order
            .into_iter()
            .enumerate()
            .map(|(position, index)| RankedAlternative {
                index,
                name: alternative_names[index].clone(),
                score: global_scores[index],
                rank: position + 1,
            })
            .collect();

        Ok(Synthesis {
            global_scores,
            ranking,
        })
    }
}
