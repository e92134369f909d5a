//! Validated linguistic term table and intensity resolution.

use serde::{Deserialize, Serialize};

use super::{
    validate_term_set, LinguisticTerm, TermDraft, TermField, TermFieldError, TermIssue,
    TermSetRejected, TermSetValidation,
};
use crate::domain::fuzzy::Tfn;

/// The default fuzzy Saaty scale: `(id, name, short name, value, (l, m, u))`.
const SAATY_SCALE: &[(u32, &str, &str, u32, (f64, f64, f64))] = &[
    (1, "Equally important", "EI", 1, (1.0, 1.0, 1.0)),
    (2, "Equally to weakly important", "EWI", 2, (1.0, 2.0, 3.0)),
    (3, "Weakly important", "WI", 3, (2.0, 3.0, 4.0)),
    (4, "Weakly to strongly important", "WSI", 4, (3.0, 4.0, 5.0)),
    (5, "Strongly important", "SI", 5, (4.0, 5.0, 6.0)),
    (6, "Strongly to very strongly important", "SVI", 6, (5.0, 6.0, 7.0)),
    (7, "Very strongly important", "VSI", 7, (6.0, 7.0, 8.0)),
    (8, "Very strongly to absolutely important", "VAI", 8, (7.0, 8.0, 9.0)),
    (9, "Absolutely important", "AI", 9, (9.0, 9.0, 9.0)),
];

/// An accepted linguistic term table.
///
/// Construction always goes through [`validate_term_set`], so every instance
/// satisfies the table invariants. The table is swapped wholesale on edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TermDraft>", into = "Vec<TermDraft>")]
pub struct LinguisticTermSet {
    terms: Vec<LinguisticTerm>,
}

impl LinguisticTermSet {
    /// Validates `drafts` and builds a term set from them.
    ///
    /// # Errors
    ///
    /// Returns the full validation report if any rule fails.
    pub fn try_new(drafts: Vec<TermDraft>) -> Result<Self, TermSetRejected> {
        let report = validate_term_set(&drafts);
        if !report.is_valid() {
            return Err(TermSetRejected(report));
        }

        // Validated above: bounds finite, positive and ordered.
        let mut terms = Vec::with_capacity(drafts.len());
        for (index, d) in drafts.into_iter().enumerate() {
            let Ok(value) = u32::try_from(d.value) else {
                let mut report = TermSetValidation::default();
                report.field_errors.push(TermFieldError {
                    index,
                    term_id: d.id,
                    field: TermField::Value,
                    issue: TermIssue::ValueTooLarge,
                });
                return Err(TermSetRejected(report));
            };
            terms.push(LinguisticTerm {
                id: d.id,
                name: d.name,
                short_name: d.short_name.trim().to_string(),
                value,
                tri: Tfn::from_components(d.l, d.m, d.u),
            });
        }

        Ok(Self { terms })
    }

    /// The standard nine-level fuzzy Saaty scale.
    pub fn saaty() -> Self {
        let terms = SAATY_SCALE
            .iter()
            .map(|&(id, name, short_name, value, (l, m, u))| LinguisticTerm {
                id,
                name: name.to_string(),
                short_name: short_name.to_string(),
                value,
                tri: Tfn::from_components(l, m, u),
            })
            .collect();

        Self { terms }
    }

    /// Returns the accepted terms in table order.
    pub fn terms(&self) -> &[LinguisticTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Always false for an accepted table; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Looks up the term with the given intensity value.
    pub fn find_by_value(&self, value: u32) -> Option<&LinguisticTerm> {
        self.terms.iter().find(|t| t.value == value)
    }

    /// Looks up a term by its short name.
    pub fn find_by_short_name(&self, short_name: &str) -> Option<&LinguisticTerm> {
        self.terms.iter().find(|t| t.short_name == short_name)
    }

    /// Resolves a signed comparison intensity to a TFN.
    ///
    /// - `intensity >= 1`: the TFN of the term whose value is
    ///   `round(intensity)`.
    /// - `0 < intensity < 1`: the inverse of the TFN of the term whose value
    ///   is `round(1 / intensity)`.
    ///
    /// An intensity with no matching term (including non-positive or
    /// non-finite input) resolves to `(1, 1, 1)`.
    pub fn to_tfn(&self, intensity: f64) -> Tfn {
        if !intensity.is_finite() || intensity <= 0.0 {
            tracing::debug!(intensity, "non-positive intensity resolved to identity");
            return Tfn::ONE;
        }

        let (base, inverted) = if intensity >= 1.0 {
            (intensity, false)
        } else {
            (1.0 / intensity, true)
        };

        match self.find_by_value(round_to_value(base)) {
            Some(term) if inverted => term.tri.inverse(),
            Some(term) => term.tri,
            None => {
                tracing::debug!(intensity, "no linguistic term for intensity");
                Tfn::ONE
            }
        }
    }

    /// Every intensity an editor may offer: each term value, plus the
    /// reciprocal of each value above 1. Sorted ascending.
    pub fn allowed_intensities(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self
            .terms
            .iter()
            .flat_map(|t| {
                let direct = f64::from(t.value);
                let reciprocal = (t.value > 1).then(|| 1.0 / direct);
                std::iter::once(direct).chain(reciprocal)
            })
            .collect();
        values.sort_by(f64::total_cmp);
        values
    }

    /// Returns the table as editable drafts.
    pub fn to_drafts(&self) -> Vec<TermDraft> {
        self.terms.iter().map(TermDraft::from).collect()
    }
}

fn round_to_value(value: f64) -> u32 {
    let rounded = value.round();
    if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}

impl Default for LinguisticTermSet {
    fn default() -> Self {
        Self::saaty()
    }
}

impl TryFrom<Vec<TermDraft>> for LinguisticTermSet {
    type Error = TermSetRejected;

    fn try_from(drafts: Vec<TermDraft>) -> Result<Self, Self::Error> {
        Self::try_new(drafts)
    }
}

impl From<LinguisticTermSet> for Vec<TermDraft> {
    fn from(set: LinguisticTermSet) -> Self {
        set.to_drafts()
    }
}
