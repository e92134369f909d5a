//! Engine configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::analysis::DEFAULT_CONSISTENCY_THRESHOLD;
use crate::domain::scale::{LinguisticTermSet, TermDraft, TermSetRejected};

/// Settings for the fuzzy AHP engine and the initial session.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Consistency ratio above which a matrix is flagged
    #[serde(default = "default_consistency_threshold")]
    pub consistency_threshold: f64,

    /// Term table override; the Saaty scale is used when absent
    #[serde(default)]
    pub terms: Option<Vec<TermDraft>>,

    /// Initial criterion names
    #[serde(default = "default_criteria")]
    pub criteria: Vec<String>,

    /// Initial alternative names
    #[serde(default = "default_alternatives")]
    pub alternatives: Vec<String>,
}

impl EngineConfig {
    /// Resolves the configured term table.
    pub fn term_set(&self) -> Result<LinguisticTermSet, TermSetRejected> {
        match &self.terms {
            Some(drafts) => LinguisticTermSet::try_new(drafts.clone()),
            None => Ok(LinguisticTermSet::saaty()),
        }
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let threshold = self.consistency_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ValidationError::InvalidConsistencyThreshold(threshold));
        }
        if self.criteria.iter().any(|name| name.trim().is_empty()) {
            return Err(ValidationError::EmptyName("criterion"));
        }
        if self.alternatives.iter().any(|name| name.trim().is_empty()) {
            return Err(ValidationError::EmptyName("alternative"));
        }
        self.term_set()?;
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            consistency_threshold: default_consistency_threshold(),
            terms: None,
            criteria: default_criteria(),
            alternatives: default_alternatives(),
        }
    }
}

fn default_consistency_threshold() -> f64 {
    DEFAULT_CONSISTENCY_THRESHOLD
}

fn default_criteria() -> Vec<String> {
    vec!["Criterion 1".to_string(), "Criterion 2".to_string()]
}

fn default_alternatives() -> Vec<String> {
    vec!["Alternative 1".to_string(), "Alternative 2".to_string()]
}
