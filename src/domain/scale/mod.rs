//! Linguistic scale - mapping between comparison intensities and TFNs.
//!
//! # Components
//!
//! - `LinguisticTerm` / `TermDraft` - accepted and editable term rows
//! - `LinguisticTermSet` - validated table, intensity resolution
//! - `validate_term_set` - pure, field-level validator

mod term;
mod term_set;
mod validation;

pub use term::{LinguisticTerm, TermDraft};
pub use term_set::LinguisticTermSet;
pub use validation::{
    validate_term_set, TermField, TermFieldError, TermIssue, TermSetIssue, TermSetRejected,
    TermSetValidation, ISSUE_SEPARATOR, MAX_TERM_VALUE, MIN_TERMS,
};
