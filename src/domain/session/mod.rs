//! Session domain module.
//!
//! The `Session` aggregate owns the term table, item names and every
//! comparison matrix of one analysis, and exposes explicit commands plus
//! `compute()`.

mod aggregate;

pub use aggregate::{Session, MAX_NAME_LENGTH};
