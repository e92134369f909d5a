//! Command handlers for sessions.

mod bootstrap;
mod session_command;
mod shared_session;

pub use bootstrap::bootstrap_session;
pub use session_command::{CommandOutcome, SessionCommand, SessionCommandHandler};
pub use shared_session::SharedSession;
