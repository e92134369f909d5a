//! Pairwise comparison matrices.
//!
//! `ReciprocalMatrix` keeps the reciprocal and diagonal invariants at every
//! mutation. `IndexMapping` describes how item indices move when items are
//! inserted or removed, and is applied to every matrix of a level at once.

mod index_mapping;
mod reciprocal_matrix;

pub use index_mapping::IndexMapping;
pub use reciprocal_matrix::{PairwiseCell, ReciprocalMatrix};
