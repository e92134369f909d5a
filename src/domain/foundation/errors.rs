//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' must be finite, got {actual}")]
    NotFinite { field: String, actual: f64 },

    #[error("Field '{field}' is out of order: {lower} > {upper}")]
    OutOfOrder { field: String, lower: f64, upper: f64 },
}

impl ValidationError {
    /// Creates a non-finite number validation error.
    pub fn not_finite(field: impl Into<String>, actual: f64) -> Self {
        ValidationError::NotFinite {
            field: field.into(),
            actual,
        }
    }

    /// Creates an ordering validation error (`lower` should not exceed `upper`).
    pub fn out_of_order(field: impl Into<String>, lower: f64, upper: f64) -> Self {
        ValidationError::OutOfOrder {
            field: field.into(),
            lower,
            upper,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidTermSet,
    InvalidIntensity,

    // Addressing errors
    IndexOutOfRange,
    SelfComparison,

    // Structural errors
    StructuralInconsistency,

    // Infrastructure errors
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidTermSet => "INVALID_TERM_SET",
            ErrorCode::InvalidIntensity => "INVALID_INTENSITY",
            ErrorCode::IndexOutOfRange => "INDEX_OUT_OF_RANGE",
            ErrorCode::SelfComparison => "SELF_COMPARISON",
            ErrorCode::StructuralInconsistency => "STRUCTURAL_INCONSISTENCY",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Creates an index error for a collection of the given length.
    pub fn index_out_of_range(what: impl Into<String>, index: usize, len: usize) -> Self {
        let what = what.into();
        Self::new(
            ErrorCode::IndexOutOfRange,
            format!("{} index {} is out of range (size {})", what, index, len),
        )
        .with_detail("target", what)
        .with_detail("index", index.to_string())
        .with_detail("size", len.to_string())
    }

    /// Creates a structural inconsistency error.
    pub fn structural(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StructuralInconsistency, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns true if this error means no result can be produced for the
    /// current structure.
    pub fn is_structural(&self) -> bool {
        self.code == ErrorCode::StructuralInconsistency
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(ErrorCode::ValidationFailed, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_out_of_order_displays_correctly() {
        let err = ValidationError::out_of_order("tri.l", 3.0, 2.0);
        assert_eq!(format!("{}", err), "Field 'tri.l' is out of order: 3 > 2");
    }

    #[test]
    fn validation_error_not_finite_displays_correctly() {
        let err = ValidationError::not_finite("tri.u", f64::INFINITY);
        assert_eq!(format!("{}", err), "Field 'tri.u' must be finite, got inf");
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::structural("criteria matrix has size 3, expected 2");
        assert_eq!(
            format!("{}", err),
            "[STRUCTURAL_INCONSISTENCY] criteria matrix has size 3, expected 2"
        );
        assert!(err.is_structural());
    }

    #[test]
    fn index_out_of_range_records_details() {
        let err = DomainError::index_out_of_range("criterion", 4, 2);
        assert_eq!(err.code, ErrorCode::IndexOutOfRange);
        assert_eq!(err.details.get("index"), Some(&"4".to_string()));
        assert_eq!(err.details.get("size"), Some(&"2".to_string()));
        assert!(!err.is_structural());
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::validation("intensity", "must be positive")
            .with_detail("value", "-1");

        assert_eq!(err.details.get("field"), Some(&"intensity".to_string()));
        assert_eq!(err.details.get("value"), Some(&"-1".to_string()));
    }

    #[test]
    fn validation_error_converts_to_domain_error() {
        let err: DomainError = ValidationError::out_of_order("l", 3.0, 2.0).into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Field 'l' is out of order: 3 > 2");
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::InvalidTermSet), "INVALID_TERM_SET");
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }
}
