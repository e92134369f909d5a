use fuzzy_ahp::domain::analysis::WeightDerivation;
use fuzzy_ahp::domain::fuzzy::Tfn;
use fuzzy_ahp::domain::matrix::{IndexMapping, ReciprocalMatrix};
use fuzzy_ahp::domain::scale::LinguisticTermSet;
use fuzzy_ahp::domain::session::Session;
use proptest::prelude::*;

fn intensity() -> impl Strategy<Value = f64> {
    (1u32..=9, any::<bool>()).prop_map(|(v, invert)| {
        let v = f64::from(v);
        if invert {
            1.0 / v
        } else {
            v
        }
    })
}

/// A matrix of size `2..=7` with random judgments.
fn judged_matrix() -> impl Strategy<Value = ReciprocalMatrix> {
    (2usize..=7)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec((0..n, 0..n, intensity()), 0..20),
            )
        })
        .prop_map(|(n, edits)| {
            let scale = LinguisticTermSet::saaty();
            let mut matrix = ReciprocalMatrix::identity(n);
            for (i, j, x) in edits {
                if i != j {
                    matrix
                        .set_pairwise(i, j, x, &scale)
                        .expect("valid edit");
                }
            }
            matrix
        })
}

proptest! {
    #[test]
    fn edits_keep_matrix_reciprocal(matrix in judged_matrix()) {
        prop_assert!(matrix.is_reciprocal(1e-9));
        for i in 0..matrix.size() {
            prop_assert_eq!(matrix.tri(i, i), Some(Tfn::ONE));
        }
    }

    #[test]
    fn normalized_weights_form_distribution(matrix in judged_matrix()) {
        let weights = WeightDerivation::derive(&matrix);
        prop_assert!(!weights.degenerate);
        prop_assert!(weights.normalized.iter().all(|w| *w > 0.0));
        let total: f64 = weights.normalized.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9, "sum was {}", total);
    }

    #[test]
    fn inverse_round_trips(l in 0.1f64..10.0, dm in 0.0f64..5.0, du in 0.0f64..5.0) {
        let tfn = Tfn::new(l, l + dm, l + dm + du).unwrap();
        prop_assert!(tfn.inverse().inverse().approx_eq(&tfn, 1e-9));
    }

    #[test]
    fn removal_preserves_surviving_pairs(
        (matrix, removed) in judged_matrix().prop_flat_map(|m| {
            let n = m.size();
            (Just(m), 0..n)
        })
    ) {
        let mapping = IndexMapping::remove_at(matrix.size(), removed).unwrap();
        let resized = matrix.resize(&mapping).unwrap();

        prop_assert_eq!(resized.size(), matrix.size() - 1);
        prop_assert!(resized.is_reciprocal(1e-9));
        for i in 0..matrix.size() {
            for j in 0..matrix.size() {
                if let (Some(ni), Some(nj)) = (mapping.map(i), mapping.map(j)) {
                    prop_assert_eq!(resized.tri(ni, nj), matrix.tri(i, j));
                }
            }
        }
    }

    #[test]
    fn session_edits_keep_dimensions(ops in prop::collection::vec(0u8..4, 0..12)) {
        let mut session = Session::default();
        for op in ops {
            session = match op {
                0 => session.add_criterion("C").unwrap(),
                1 => session.add_alternative("A").unwrap(),
                2 if session.criteria().len() > 1 => session.remove_criterion(0).unwrap(),
                3 if session.alternatives().len() > 1 => session.remove_alternative(0).unwrap(),
                _ => session,
            };
        }

        prop_assert_eq!(session.criteria_matrix().size(), session.criteria().len());
        prop_assert_eq!(session.alternative_matrices().len(), session.criteria().len());
        let result = session.compute().unwrap();
        prop_assert_eq!(result.global_scores.len(), session.alternatives().len());
        let total: f64 = result.global_scores.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
    }
}
