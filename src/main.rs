//! Demo entry point: builds a session from configuration, computes the
//! ranking and prints the result as JSON.

use std::process::ExitCode;
use std::sync::Arc;

use fuzzy_ahp::adapters::TracingEventPublisher;
use fuzzy_ahp::application::{bootstrap_session, SessionCommand, SessionCommandHandler};
use fuzzy_ahp::config::AppConfig;
use fuzzy_ahp::telemetry::init_tracing;

fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    init_tracing(&config.logging);

    let session = match bootstrap_session(&config.engine) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "could not create session");
            return ExitCode::FAILURE;
        }
    };

    let handler = SessionCommandHandler::new(Arc::new(TracingEventPublisher::new()));
    let outcome = match handler.handle(&session, SessionCommand::Recompute) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "computation failed");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&outcome.result) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "could not serialize result");
            ExitCode::FAILURE
        }
    }
}
