//! Fuzzy number arithmetic.
//!
//! Triangular fuzzy numbers (TFNs) carry every pairwise judgment in the
//! engine. The operations here are the only arithmetic the weight
//! derivation needs: inverse, elementwise product, sum, geometric mean and
//! centroid defuzzification.

mod tfn;

pub use tfn::{Tfn, TriangularFuzzyNumber};
