//! Consistency check on the most-likely values of a comparison matrix.

use serde::Serialize;

use crate::domain::matrix::ReciprocalMatrix;

/// Saaty's random consistency index for n = 1..=15.
pub const RANDOM_INDEX: [f64; 15] = [
    0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49, 1.51, 1.48, 1.56, 1.57, 1.59,
];

/// Conventional acceptance threshold for the consistency ratio.
pub const DEFAULT_CONSISTENCY_THRESHOLD: f64 = 0.10;

/// Consistency of one matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyReport {
    pub lambda_max: f64,
    pub consistency_index: f64,
    pub random_index: f64,
    pub consistency_ratio: f64,
    pub threshold: f64,
    pub acceptable: bool,
}

/// Consistency ratio computation.
pub struct ConsistencyCheck;

impl ConsistencyCheck {
    /// Evaluates the consistency ratio of the crisp matrix formed by the
    /// modal value of every cell.
    ///
    /// # Algorithm
    /// - `w` = normalized row geometric means (principal eigenvector estimate)
    /// - `λmax = mean_i((A·w)_i / w_i)`
    /// - `CI = (λmax - n) / (n - 1)`, `CR = CI / RI(n)`
    ///
    /// # Edge Cases
    /// - `n <= 2`: always perfectly consistent (`CR = 0`)
    /// - `n > 15`: uses the last tabulated random index
    ///
    /// Informational only; an inconsistent matrix still produces weights.
    pub fn evaluate(matrix: &ReciprocalMatrix, threshold: f64) -> ConsistencyReport {
        let n = matrix.size();
        if n <= 2 {
            return ConsistencyReport {
                lambda_max: n as f64,
                consistency_index: 0.0,
                random_index: random_index(n),
                consistency_ratio: 0.0,
                threshold,
                acceptable: true,
            };
        }

        let values = matrix.modal_values();
        let priorities = principal_vector(&values);

        let ratios: Vec<f64> = values
            .iter()
            .zip(&priorities)
            .filter(|(_, w)| **w > 0.0)
            .map(|(row, w)| {
                let weighted: f64 = row.iter().zip(&priorities).map(|(a, p)| a * p).sum();
                weighted / w
            })
            .collect();

        let lambda_max = if ratios.is_empty() {
            n as f64
        } else {
            ratios.iter().sum::<f64>() / ratios.len() as f64
        };

        let consistency_index = ((lambda_max - n as f64) / (n as f64 - 1.0)).max(0.0);
        let random_index = random_index(n);
        let consistency_ratio = if random_index > 0.0 {
            consistency_index / random_index
        } else {
            0.0
        };

        ConsistencyReport {
            lambda_max,
            consistency_index,
            random_index,
            consistency_ratio,
            threshold,
            acceptable: consistency_ratio <= threshold,
        }
    }
}

fn random_index(n: usize) -> f64 {
    match n {
        0 => 0.0,
        n => RANDOM_INDEX[(n - 1).min(RANDOM_INDEX.len() - 1)],
    }
}

fn principal_vector(values: &[Vec<f64>]) -> Vec<f64> {
    let means: Vec<f64> = values
        .iter()
        .map(|row| {
            let product: f64 = row.iter().product();
            product.powf(1.0 / row.len() as f64)
        })
        .collect();

    let total: f64 = means.iter().sum();
    if total == 0.0 {
        return vec![0.0; means.len()];
    }
    means.iter().map(|m| m / total).collect()
}
