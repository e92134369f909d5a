//! Configuration error types

use thiserror::Error;

use crate::domain::scale::TermSetRejected;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Consistency threshold must be in (0, 1], got {0}")]
    InvalidConsistencyThreshold(f64),

    #[error("Empty {0} name")]
    EmptyName(&'static str),

    #[error("Invalid term table: {0}")]
    InvalidTermTable(#[from] TermSetRejected),

    #[error("Invalid log filter '{0}'")]
    InvalidLogFilter(String),
}
