//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and publishes their events
//! through ports.

pub mod handlers;

pub use handlers::{
    bootstrap_session, CommandOutcome, SessionCommand, SessionCommandHandler, SharedSession,
};
