//! Weight Derivation - Buckley's geometric-mean method for one matrix.

use serde::Serialize;

use crate::domain::fuzzy::Tfn;
use crate::domain::matrix::ReciprocalMatrix;

/// Every artifact of one Buckley run, kept for audit and display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedWeights {
    /// Row geometric means `r_i`.
    pub geometric_means: Vec<Tfn>,
    /// `Σ r_i`.
    pub geometric_mean_sum: Tfn,
    /// Inverse of the sum.
    pub inverse_sum: Tfn,
    /// Synthetic extents `w_i = r_i ⊗ (Σ r)^-1`.
    pub fuzzy_weights: Vec<Tfn>,
    /// Centroid of each fuzzy weight.
    pub defuzzified: Vec<f64>,
    /// Defuzzified weights scaled to sum to 1.
    pub normalized: Vec<f64>,
    /// Set when the defuzzified weights summed to zero and every normalized
    /// weight was forced to 0.
    pub degenerate: bool,
}

impl DerivedWeights {
    /// Number of items weighted.
    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    /// Returns true if no items were weighted.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Buckley weight derivation.
pub struct WeightDerivation;

impl WeightDerivation {
    /// Reduces a reciprocal matrix to normalized crisp weights.
    ///
    /// # Algorithm
    /// 1. `r_i = geometric_mean(row_i)`
    /// 2. `s = Σ r_i`
    /// 3. `s' = inverse(s)`
    /// 4. `w_i = r_i ⊗ s'`
    /// 5. `c_i = centroid(w_i)`
    /// 6. `n_i = c_i / Σ c_j`
    ///
    /// # Edge Cases
    /// - Empty matrix: all vectors empty
    /// - `Σ c_j == 0`: every `n_i` is 0 and `degenerate` is set
    ///
    /// Stateless; runs are independent of each other and of call order.
    pub fn derive(matrix: &ReciprocalMatrix) -> DerivedWeights {
        let size = matrix.size();

        let geometric_means: Vec<Tfn> = (0..size)
            .map(|i| Tfn::geometric_mean(&matrix.row_tfns(i)))
            .collect();

        let geometric_mean_sum = Tfn::sum(&geometric_means);
        let inverse_sum = geometric_mean_sum.inverse();

        let fuzzy_weights: Vec<Tfn> = geometric_means
            .iter()
            .map(|r| r.multiply(&inverse_sum))
            .collect();

        let defuzzified: Vec<f64> = fuzzy_weights.iter().map(Tfn::centroid).collect();

        let total: f64 = defuzzified.iter().sum();
        let degenerate = size > 0 && total == 0.0;
        let normalized = if total == 0.0 {
            vec![0.0; size]
        } else {
            defuzzified.iter().map(|c| c / total).collect()
        };

        if degenerate {
            tracing::warn!(size, "defuzzified weights sum to zero, normalized weights forced to 0");
        }

        DerivedWeights {
            geometric_means,
            geometric_mean_sum,
            inverse_sum,
            fuzzy_weights,
            defuzzified,
            normalized,
            degenerate,
        }
    }
}
