//! Domain layer containing the fuzzy AHP model and its computations.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `fuzzy` - Triangular fuzzy numbers and their arithmetic
//! - `scale` - Linguistic term tables and their validation
//! - `matrix` - Reciprocal pairwise comparison matrices and index mappings
//! - `analysis` - Pure domain services (weights, consistency, aggregation)
//! - `session` - The session aggregate owning one comparison hierarchy

pub mod analysis;
pub mod foundation;
pub mod fuzzy;
pub mod matrix;
pub mod scale;
pub mod session;
