//! Linguistic terms: a named comparison intensity and its fuzzy number.

use serde::{Deserialize, Serialize};

use crate::domain::fuzzy::Tfn;

/// One accepted row of a linguistic term table.
///
/// Only a validated [`LinguisticTermSet`](super::LinguisticTermSet) hands
/// these out, so `value >= 1` and `tri` is ordered and strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinguisticTerm {
    pub id: u32,
    pub name: String,
    pub short_name: String,
    /// Saaty intensity (odd = anchor, even = intermediate).
    pub value: u32,
    pub tri: Tfn,
}

/// An editable, not-yet-validated term row.
///
/// Drafts can hold anything a user may type, including unordered fuzzy
/// bounds or a blank short name, so the validator can point at every
/// offending field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermDraft {
    pub id: u32,
    pub name: String,
    pub short_name: String,
    pub value: i64,
    pub l: f64,
    pub m: f64,
    pub u: f64,
}

impl TermDraft {
    /// Creates a draft row.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        short_name: impl Into<String>,
        value: i64,
        (l, m, u): (f64, f64, f64),
    ) -> Self {
        Self {
            id,
            name: name.into(),
            short_name: short_name.into(),
            value,
            l,
            m,
            u,
        }
    }
}

impl From<&LinguisticTerm> for TermDraft {
    fn from(term: &LinguisticTerm) -> Self {
        Self {
            id: term.id,
            name: term.name.clone(),
            short_name: term.short_name.clone(),
            value: i64::from(term.value),
            l: term.tri.l(),
            m: term.tri.m(),
            u: term.tri.u(),
        }
    }
}
