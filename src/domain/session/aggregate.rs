//! Session aggregate entity.
//!
//! A session owns everything one fuzzy AHP analysis depends on: the
//! linguistic term table, the criterion and alternative names, the criteria
//! matrix and one alternative matrix per criterion. These form a single
//! consistency domain, so they live and change together.
//!
//! # Commands
//!
//! Every command borrows the current session and returns a new, valid one.
//! A failed command leaves the caller's session untouched.

use serde::Serialize;

use crate::domain::analysis::{
    AnalysisResult, CriterionAlternatives, HierarchicalAggregator, MatrixAnalysis,
    DEFAULT_CONSISTENCY_THRESHOLD,
};
use crate::domain::foundation::{DomainError, SessionId, Timestamp};
use crate::domain::matrix::{IndexMapping, ReciprocalMatrix};
use crate::domain::scale::{LinguisticTermSet, TermDraft, TermSetRejected};

/// Maximum length for criterion and alternative names.
pub const MAX_NAME_LENGTH: usize = 200;

/// Session aggregate - the single owner of one comparison hierarchy.
///
/// # Invariants
///
/// - `criteria_matrix.size() == criteria.len()`
/// - exactly one alternative matrix per criterion
/// - every alternative matrix has size `alternatives.len()`
/// - every matrix is reciprocal with a unit diagonal
///
/// Only [`reconstitute`](Self::reconstitute) can build a session that
/// breaks the size invariants; [`compute`](Self::compute) refuses to run on
/// such a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,

    /// Term table used to resolve new comparisons.
    terms: LinguisticTermSet,

    /// Ordered criterion names.
    criteria: Vec<String>,

    /// Ordered alternative names.
    alternatives: Vec<String>,

    /// Pairwise comparisons among criteria.
    criteria_matrix: ReciprocalMatrix,

    /// Pairwise comparisons among alternatives, one matrix per criterion.
    alternative_matrices: Vec<ReciprocalMatrix>,

    /// Consistency ratio above which a matrix is flagged.
    consistency_threshold: f64,

    /// When the session was created.
    created_at: Timestamp,

    /// When the session was last changed.
    updated_at: Timestamp,
}

impl Session {
    /// Creates a session with identity comparisons everywhere.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if any name is empty or too long
    pub fn new(
        criteria: Vec<String>,
        alternatives: Vec<String>,
        terms: LinguisticTermSet,
    ) -> Result<Self, DomainError> {
        let criteria = Self::validate_names("criterion", criteria)?;
        let alternatives = Self::validate_names("alternative", alternatives)?;

        let now = Timestamp::now();
        Ok(Self {
            id: SessionId::new(),
            terms,
            criteria_matrix: ReciprocalMatrix::identity(criteria.len()),
            alternative_matrices: vec![ReciprocalMatrix::identity(alternatives.len()); criteria.len()],
            criteria,
            alternatives,
            consistency_threshold: DEFAULT_CONSISTENCY_THRESHOLD,
            created_at: now,
            updated_at: now,
        })
    }

    /// Two criteria, two alternatives and the default Saaty scale.
    pub fn with_defaults() -> Self {
        let now = Timestamp::now();
        Self {
            id: SessionId::new(),
            terms: LinguisticTermSet::saaty(),
            criteria: vec!["Criterion 1".to_string(), "Criterion 2".to_string()],
            alternatives: vec!["Alternative 1".to_string(), "Alternative 2".to_string()],
            criteria_matrix: ReciprocalMatrix::identity(2),
            alternative_matrices: vec![ReciprocalMatrix::identity(2); 2],
            consistency_threshold: DEFAULT_CONSISTENCY_THRESHOLD,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reassembles a session from externally held parts (no validation).
    ///
    /// Every field is taken as given, including the threshold and both
    /// timestamps.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        terms: LinguisticTermSet,
        criteria: Vec<String>,
        alternatives: Vec<String>,
        criteria_matrix: ReciprocalMatrix,
        alternative_matrices: Vec<ReciprocalMatrix>,
        consistency_threshold: f64,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            terms,
            criteria,
            alternatives,
            criteria_matrix,
            alternative_matrices,
            consistency_threshold,
            created_at,
            updated_at,
        }
    }

    /// Sets the consistency ratio threshold.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` unless `0 < threshold <= 1`
    pub fn with_consistency_threshold(mut self, threshold: f64) -> Result<Self, DomainError> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(DomainError::validation(
                "consistency_threshold",
                format!("Consistency threshold must be in (0, 1], got {}", threshold),
            ));
        }
        self.consistency_threshold = threshold;
        Ok(self)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the current term table.
    pub fn terms(&self) -> &LinguisticTermSet {
        &self.terms
    }

    /// Returns the criterion names.
    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    /// Returns the alternative names.
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// Returns the criteria comparison matrix.
    pub fn criteria_matrix(&self) -> &ReciprocalMatrix {
        &self.criteria_matrix
    }

    /// Returns the alternative comparison matrix for `criterion`.
    pub fn alternative_matrix(&self, criterion: usize) -> Option<&ReciprocalMatrix> {
        self.alternative_matrices.get(criterion)
    }

    /// Returns every alternative comparison matrix, in criterion order.
    pub fn alternative_matrices(&self) -> &[ReciprocalMatrix] {
        &self.alternative_matrices
    }

    /// Returns the consistency ratio threshold.
    pub fn consistency_threshold(&self) -> f64 {
        self.consistency_threshold
    }

    /// When the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// When the session last changed.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Comparison commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Records a comparison between criteria `i` and `j`.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange`, `SelfComparison`, `InvalidIntensity` as for
    ///   [`ReciprocalMatrix::set_pairwise`]
    pub fn set_criteria_comparison(
        &self,
        i: usize,
        j: usize,
        intensity: f64,
    ) -> Result<Self, DomainError> {
        let mut next = self.clone();
        next.criteria_matrix
            .set_pairwise(i, j, intensity, &self.terms)?;
        next.touch();
        Ok(next)
    }

    /// Records a comparison between alternatives `i` and `j` under
    /// `criterion`.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` if `criterion` does not exist
    /// - otherwise as for [`ReciprocalMatrix::set_pairwise`]
    pub fn set_alternative_comparison(
        &self,
        criterion: usize,
        i: usize,
        j: usize,
        intensity: f64,
    ) -> Result<Self, DomainError> {
        let mut next = self.clone();
        let count = next.alternative_matrices.len();
        next.alternative_matrices
            .get_mut(criterion)
            .ok_or_else(|| DomainError::index_out_of_range("criterion", criterion, count))?
            .set_pairwise(i, j, intensity, &self.terms)?;
        next.touch();
        Ok(next)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Structural commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies an explicit index mapping to the criteria level.
    ///
    /// The criteria matrix is projected through `mapping`; alternative
    /// matrices move with their criterion, dropped criteria lose theirs and
    /// fresh criteria get an identity matrix.
    ///
    /// # Errors
    ///
    /// - `StructuralInconsistency` if `mapping` was built for another size
    /// - `ValidationFailed` if `names` does not match the new size or a name
    ///   is invalid
    pub fn resize_criteria(
        &self,
        mapping: &IndexMapping,
        names: Vec<String>,
    ) -> Result<Self, DomainError> {
        let names = Self::validate_names("criterion", names)?;
        Self::check_name_count("criteria", &names, mapping)?;

        let mut next = self.clone();
        next.criteria_matrix = self.criteria_matrix.resize(mapping)?;
        let alternative_count = self.alternatives.len();
        next.alternative_matrices = mapping.project(self.alternative_matrices.clone(), |_| {
            ReciprocalMatrix::identity(alternative_count)
        });
        next.criteria = names;
        next.touch();

        tracing::debug!(
            session_id = %self.id,
            criteria = next.criteria.len(),
            "criteria resized"
        );
        Ok(next)
    }

    /// Applies an explicit index mapping to the alternatives level. Every
    /// alternative matrix is resized with the same mapping.
    ///
    /// # Errors
    ///
    /// As for [`resize_criteria`](Self::resize_criteria).
    pub fn resize_alternatives(
        &self,
        mapping: &IndexMapping,
        names: Vec<String>,
    ) -> Result<Self, DomainError> {
        let names = Self::validate_names("alternative", names)?;
        Self::check_name_count("alternatives", &names, mapping)?;

        let mut next = self.clone();
        next.alternative_matrices = self
            .alternative_matrices
            .iter()
            .map(|m| m.resize(mapping))
            .collect::<Result<_, _>>()?;
        next.alternatives = names;
        next.touch();

        tracing::debug!(
            session_id = %self.id,
            alternatives = next.alternatives.len(),
            "alternatives resized"
        );
        Ok(next)
    }

    /// Appends a criterion.
    pub fn add_criterion(&self, name: impl Into<String>) -> Result<Self, DomainError> {
        self.insert_criterion(self.criteria.len(), name)
    }

    /// Inserts a criterion at `at`, shifting later criteria.
    pub fn insert_criterion(&self, at: usize, name: impl Into<String>) -> Result<Self, DomainError> {
        let mapping = IndexMapping::insert_at(self.criteria.len(), at)?;
        let mut name = Some(name.into());
        let names = mapping.project(self.criteria.clone(), |_| name.take().unwrap_or_default());
        self.resize_criteria(&mapping, names)
    }

    /// Removes the criterion at `index` together with its alternative matrix.
    pub fn remove_criterion(&self, index: usize) -> Result<Self, DomainError> {
        let mapping = IndexMapping::remove_at(self.criteria.len(), index)?;
        let names = mapping.project(self.criteria.clone(), |_| String::new());
        self.resize_criteria(&mapping, names)
    }

    /// Renames the criterion at `index`.
    pub fn rename_criterion(&self, index: usize, name: impl Into<String>) -> Result<Self, DomainError> {
        let mut next = self.clone();
        let name = Self::validate_name("criterion", name.into())?;
        let count = next.criteria.len();
        *next
            .criteria
            .get_mut(index)
            .ok_or_else(|| DomainError::index_out_of_range("criterion", index, count))? = name;
        next.touch();
        Ok(next)
    }

    /// Appends an alternative.
    pub fn add_alternative(&self, name: impl Into<String>) -> Result<Self, DomainError> {
        self.insert_alternative(self.alternatives.len(), name)
    }

    /// Inserts an alternative at `at`, shifting later alternatives.
    pub fn insert_alternative(
        &self,
        at: usize,
        name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let mapping = IndexMapping::insert_at(self.alternatives.len(), at)?;
        let mut name = Some(name.into());
        let names = mapping.project(self.alternatives.clone(), |_| {
            name.take().unwrap_or_default()
        });
        self.resize_alternatives(&mapping, names)
    }

    /// Removes the alternative at `index` from every alternative matrix.
    pub fn remove_alternative(&self, index: usize) -> Result<Self, DomainError> {
        let mapping = IndexMapping::remove_at(self.alternatives.len(), index)?;
        let names = mapping.project(self.alternatives.clone(), |_| String::new());
        self.resize_alternatives(&mapping, names)
    }

    /// Renames the alternative at `index`.
    pub fn rename_alternative(
        &self,
        index: usize,
        name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let mut next = self.clone();
        let name = Self::validate_name("alternative", name.into())?;
        let count = next.alternatives.len();
        *next
            .alternatives
            .get_mut(index)
            .ok_or_else(|| DomainError::index_out_of_range("alternative", index, count))? = name;
        next.touch();
        Ok(next)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Term table commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the term table with an edited one.
    ///
    /// Cells already entered keep the TFNs they were resolved to; only new
    /// comparisons use the new table. Call [`refresh_cells`](Self::refresh_cells)
    /// to re-resolve existing cells.
    ///
    /// # Errors
    ///
    /// Returns the validation report if the table is not acceptable. The
    /// current table stays in force.
    pub fn update_term_set(&self, drafts: Vec<TermDraft>) -> Result<Self, TermSetRejected> {
        let terms = LinguisticTermSet::try_new(drafts).map_err(|rejected| {
            tracing::warn!(
                session_id = %self.id,
                errors = rejected.report().error_count(),
                "term table edit rejected"
            );
            rejected
        })?;

        let mut next = self.clone();
        next.terms = terms;
        next.touch();
        Ok(next)
    }

    /// Re-resolves every entered comparison against the current term table.
    pub fn refresh_cells(&self) -> Self {
        let mut next = self.clone();
        next.criteria_matrix = self.criteria_matrix.refreshed(&self.terms);
        next.alternative_matrices = self
            .alternative_matrices
            .iter()
            .map(|m| m.refreshed(&self.terms))
            .collect();
        next.touch();
        next
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Computation
    // ─────────────────────────────────────────────────────────────────────────

    /// Runs the full pipeline: criteria weights, alternative weights per
    /// criterion, global scores and ranking. Always from scratch.
    ///
    /// # Errors
    ///
    /// - `StructuralInconsistency` if matrix sizes disagree with the item
    ///   lists; no partial result is produced
    pub fn compute(&self) -> Result<AnalysisResult, DomainError> {
        self.check_structure().map_err(|err| {
            tracing::warn!(session_id = %self.id, error = %err, "no result available");
            err
        })?;

        let criteria_analysis = MatrixAnalysis::of(&self.criteria_matrix, self.consistency_threshold);
        let alternative_analyses: Vec<CriterionAlternatives> = self
            .alternative_matrices
            .iter()
            .zip(&self.criteria)
            .enumerate()
            .map(|(index, (matrix, name))| {
                tracing::debug!(criterion = %name, size = matrix.size(), "deriving alternative weights");
                CriterionAlternatives {
                    criterion_index: index,
                    criterion: name.clone(),
                    analysis: MatrixAnalysis::of(matrix, self.consistency_threshold),
                }
            })
            .collect();

        let alternative_weights: Vec<Vec<f64>> = alternative_analyses
            .iter()
            .map(|c| c.analysis.weights.normalized.clone())
            .collect();

        let synthesis = HierarchicalAggregator::aggregate(
            &criteria_analysis.weights.normalized,
            &alternative_weights,
            &self.alternatives,
        )?;

        let result = AnalysisResult {
            criteria: self.criteria.clone(),
            alternatives: self.alternatives.clone(),
            criteria_analysis,
            alternative_analyses,
            global_scores: synthesis.global_scores,
            ranking: synthesis.ranking,
        };

        tracing::info!(
            session_id = %self.id,
            criteria = self.criteria.len(),
            alternatives = self.alternatives.len(),
            best = result.best().map(|r| r.name.as_str()).unwrap_or("-"),
            inconsistent = result.inconsistent_matrices(),
            "ranking computed"
        );
        Ok(result)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    fn check_structure(&self) -> Result<(), DomainError> {
        let criteria = self.criteria.len();
        let alternatives = self.alternatives.len();

        if self.criteria_matrix.size() != criteria {
            return Err(DomainError::structural(format!(
                "criteria matrix has size {}, expected {}",
                self.criteria_matrix.size(),
                criteria
            )));
        }
        if self.alternative_matrices.len() != criteria {
            return Err(DomainError::structural(format!(
                "{} alternative matrices for {} criteria",
                self.alternative_matrices.len(),
                criteria
            )));
        }
        if let Some((index, matrix)) = self
            .alternative_matrices
            .iter()
            .enumerate()
            .find(|(_, m)| m.size() != alternatives)
        {
            return Err(DomainError::structural(format!(
                "alternative matrix for criterion {} has size {}, expected {}",
                index,
                matrix.size(),
                alternatives
            ))
            .with_detail("criterion", index.to_string()));
        }
        Ok(())
    }

    fn check_name_count(
        level: &str,
        names: &[String],
        mapping: &IndexMapping,
    ) -> Result<(), DomainError> {
        if names.len() != mapping.new_size() {
            return Err(DomainError::validation(
                level,
                format!(
                    "{} names given for {} {}",
                    names.len(),
                    mapping.new_size(),
                    level
                ),
            ));
        }
        Ok(())
    }

    fn validate_names(field: &str, names: Vec<String>) -> Result<Vec<String>, DomainError> {
        names
            .into_iter()
            .map(|name| Self::validate_name(field, name))
            .collect()
    }

    fn validate_name(field: &str, name: String) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation(
                field,
                format!("{} name cannot be empty", field),
            ));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(
                field,
                format!("{} name must be {} characters or less", field, MAX_NAME_LENGTH),
            ));
        }
        Ok(trimmed.to_string())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::with_defaults()
    }
}
