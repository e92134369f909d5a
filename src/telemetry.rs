//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Environment variable holding per-module filter directives.
pub const LOG_ENV_VAR: &str = "FUZZY_AHP_LOG";

static INIT: Once = Once::new();

/// Initialize the tracing subscriber.
///
/// Reads `FUZZY_AHP_LOG` for filter directives, e.g.
/// `FUZZY_AHP_LOG=fuzzy_ahp::domain::analysis=debug,info`. Falls back to
/// `config.filter` when the variable is unset or invalid.
///
/// Idempotent. If another subscriber is already installed it is left alone.
pub fn init_tracing(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(&config.filter));

        let installed = if config.json {
            tracing_subscriber::registry()
                .with(fmt::layer().json().with_target(true))
                .with(filter)
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true))
                .with(filter)
                .try_init()
        };

        if installed.is_err() {
            tracing::debug!("global subscriber already set, keeping it");
        }
    });
}
