//! Analysis Module - Pure domain services for fuzzy AHP.
//!
//! # Components
//!
//! - `WeightDerivation` - Buckley geometric-mean pipeline for one matrix
//! - `ConsistencyCheck` - Saaty consistency ratio on modal values
//! - `HierarchicalAggregator` - global scores and ranking
//! - `AnalysisResult` - the full result bundle
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. They take domain
//! objects as input and return computed results. No ports or adapters needed
//! since there's no I/O or external dependencies.

mod consistency;
mod events;
mod hierarchical_aggregator;
mod result;
mod weight_derivation;

pub use consistency::{
    ConsistencyCheck, ConsistencyReport, DEFAULT_CONSISTENCY_THRESHOLD, RANDOM_INDEX,
};
pub use events::{RankingComputed, RankingEntry};
pub use hierarchical_aggregator::{HierarchicalAggregator, RankedAlternative, Synthesis};
pub use result::{AnalysisResult, CriterionAlternatives, MatrixAnalysis};
pub use weight_derivation::{DerivedWeights, WeightDerivation};
