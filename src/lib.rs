//! Fuzzy AHP - Multi-criteria decision support with fuzzy pairwise comparisons
//!
//! This crate ranks alternatives against criteria using Buckley's
//! geometric-mean variant of the fuzzy Analytic Hierarchy Process. Users
//! express pairwise preferences on a linguistic scale, each mapped to a
//! triangular fuzzy number.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
