//! Pure validation of an edited linguistic term table.
//!
//! The validator never mutates anything and has no triggers of its own;
//! callers invoke [`validate_term_set`] whenever they need to know whether a
//! table is acceptable.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;

use super::TermDraft;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Smallest term table the engine accepts.
pub const MIN_TERMS: usize = 2;

/// Largest accepted intensity value.
pub const MAX_TERM_VALUE: i64 = u32::MAX as i64;

/// The field of a term row an error points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TermField {
    ShortName,
    Value,
    Lower,
    Modal,
    Upper,
}

impl TermField {
    /// Returns the field name as shown in error details.
    pub fn as_str(&self) -> &'static str {
        match self {
            TermField::ShortName => "short_name",
            TermField::Value => "value",
            TermField::Lower => "l",
            TermField::Modal => "m",
            TermField::Upper => "u",
        }
    }
}

impl fmt::Display for TermField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What is wrong with a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum TermIssue {
    #[error("short name is used by another term")]
    DuplicateShortName,

    #[error("intensity value is used by another term")]
    DuplicateValue,

    #[error("short name cannot be empty")]
    EmptyShortName,

    #[error("intensity value must be at least 1")]
    NonPositiveValue,

    #[error("intensity value exceeds the largest supported value")]
    ValueTooLarge,

    #[error("lower bound exceeds the most likely value")]
    LowerAboveModal,

    #[error("most likely value exceeds the upper bound")]
    ModalAboveUpper,

    #[error("fuzzy bound must be strictly positive")]
    NonPositiveComponent,

    #[error("fuzzy bound must be a finite number")]
    NonFiniteComponent,
}

/// A field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermFieldError {
    /// Position of the offending row in the submitted table.
    pub index: usize,
    pub term_id: u32,
    pub field: TermField,
    pub issue: TermIssue,
}

impl fmt::Display for TermFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "term #{} field '{}': {}", self.index, self.field, self.issue)
    }
}

/// A table-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TermSetIssue {
    #[error("at least 2 terms are required, got {count}")]
    TooFewTerms { count: usize },
}

/// Result of validating a term table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TermSetValidation {
    pub field_errors: Vec<TermFieldError>,
    pub global_errors: Vec<TermSetIssue>,
}

impl TermSetValidation {
    /// Returns true if the table can be accepted.
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty() && self.global_errors.is_empty()
    }

    /// Total number of problems found.
    pub fn error_count(&self) -> usize {
        self.field_errors.len() + self.global_errors.len()
    }

    /// Field errors reported against the row at `index`.
    pub fn errors_for(&self, index: usize) -> impl Iterator<Item = &TermFieldError> {
        self.field_errors.iter().filter(move |e| e.index == index)
    }

    /// Returns true if `field` of row `index` has the given issue.
    pub fn has(&self, index: usize, field: TermField, issue: TermIssue) -> bool {
        self.errors_for(index)
            .any(|e| e.field == field && e.issue == issue)
    }

    fn push(&mut self, index: usize, draft: &TermDraft, field: TermField, issue: TermIssue) {
        self.field_errors.push(TermFieldError {
            index,
            term_id: draft.id,
            field,
            issue,
        });
    }
}

/// Validates a term table.
///
/// # Rules
/// - at least [`MIN_TERMS`] rows
/// - short names non-empty (after trimming) and distinct
/// - values distinct and within `1..=MAX_TERM_VALUE`
/// - fuzzy bounds finite, strictly positive, `l <= m <= u`
///
/// Duplicates are reported on every row that shares the value, so an editor
/// can highlight all of them.
pub fn validate_term_set(drafts: &[TermDraft]) -> TermSetValidation {
    let mut report = TermSetValidation::default();

    if drafts.len() < MIN_TERMS {
        report.global_errors.push(TermSetIssue::TooFewTerms {
            count: drafts.len(),
        });
    }

    let mut short_name_counts: HashMap<&str, usize> = HashMap::new();
    let mut value_counts: HashMap<i64, usize> = HashMap::new();
    for draft in drafts {
        let short_name = draft.short_name.trim();
        if !short_name.is_empty() {
            *short_name_counts.entry(short_name).or_default() += 1;
        }
        *value_counts.entry(draft.value).or_default() += 1;
    }

    for (index, draft) in drafts.iter().enumerate() {
        let short_name = draft.short_name.trim();
        if short_name.is_empty() {
            report.push(index, draft, TermField::ShortName, TermIssue::EmptyShortName);
        } else if short_name_counts.get(short_name).copied().unwrap_or(0) > 1 {
            report.push(index, draft, TermField::ShortName, TermIssue::DuplicateShortName);
        }

        if draft.value < 1 {
            report.push(index, draft, TermField::Value, TermIssue::NonPositiveValue);
        } else if draft.value > MAX_TERM_VALUE {
            report.push(index, draft, TermField::Value, TermIssue::ValueTooLarge);
        }
        if value_counts.get(&draft.value).copied().unwrap_or(0) > 1 {
            report.push(index, draft, TermField::Value, TermIssue::DuplicateValue);
        }

        validate_bounds(&mut report, index, draft);
    }

    report
}

fn validate_bounds(report: &mut TermSetValidation, index: usize, draft: &TermDraft) {
    let bounds = [
        (TermField::Lower, draft.l),
        (TermField::Modal, draft.m),
        (TermField::Upper, draft.u),
    ];

    let mut all_finite = true;
    for (field, value) in bounds {
        if !value.is_finite() {
            all_finite = false;
            report.push(index, draft, field, TermIssue::NonFiniteComponent);
        } else if value <= 0.0 {
            report.push(index, draft, field, TermIssue::NonPositiveComponent);
        }
    }

    if !all_finite {
        return;
    }
    if draft.l > draft.m {
        report.push(index, draft, TermField::Lower, TermIssue::LowerAboveModal);
    }
    if draft.m > draft.u {
        report.push(index, draft, TermField::Modal, TermIssue::ModalAboveUpper);
    }
}

/// A term table that failed validation. Carries the full report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("linguistic term table rejected with {} error(s)", .0.error_count())]
pub struct TermSetRejected(pub TermSetValidation);

impl TermSetRejected {
    /// Returns the validation report.
    pub fn report(&self) -> &TermSetValidation {
        &self.0
    }
}

/// Separator between issues reported against the same detail key.
pub const ISSUE_SEPARATOR: &str = "; ";

impl From<TermSetRejected> for DomainError {
    /// Details are keyed by `table` or `terms[i].field`; several issues on
    /// one key are joined with [`ISSUE_SEPARATOR`] in report order.
    fn from(err: TermSetRejected) -> Self {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for issue in &err.0.global_errors {
            grouped
                .entry("table".to_string())
                .or_default()
                .push(issue.to_string());
        }
        for field_error in &err.0.field_errors {
            grouped
                .entry(format!("terms[{}].{}", field_error.index, field_error.field))
                .or_default()
                .push(field_error.issue.to_string());
        }

        grouped.into_iter().fold(
            DomainError::new(ErrorCode::InvalidTermSet, err.to_string()),
            |domain, (key, issues)| domain.with_detail(key, issues.join(ISSUE_SEPARATOR)),
        )
    }
}
