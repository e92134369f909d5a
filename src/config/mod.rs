//! Application configuration module
//!
//! This module provides type-safe configuration loading from an optional
//! `fuzzy_ahp.{toml,yaml,json}` file and environment variables using the
//! `config` and `dotenvy` crates. Environment variables use the `FUZZY_AHP`
//! prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use fuzzy_ahp::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Consistency threshold: {}", config.engine.consistency_threshold);
//! ```

mod engine;
mod error;
mod logging;

pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use std::path::Path;

use serde::Deserialize;

/// Base name of the optional configuration file in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "fuzzy_ahp";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Engine configuration (threshold, term table, initial items)
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration (filter, output format)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `fuzzy_ahp.*` (if present) and the environment
    ///
    /// # Environment Variable Format
    ///
    /// - `FUZZY_AHP__ENGINE__CONSISTENCY_THRESHOLD=0.2` -> `engine.consistency_threshold = 0.2`
    /// - `FUZZY_AHP__ENGINE__CRITERIA=Cost,Quality` -> `engine.criteria = ["Cost", "Quality"]`
    /// - `FUZZY_AHP__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed into its expected type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file plus the environment.
    ///
    /// With `None` the default file is optional; an explicit file must exist.
    /// Environment variables override file values.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let file_source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = config::Config::builder()
            .add_source(file_source)
            .add_source(
                config::Environment::default()
                    .prefix("FUZZY_AHP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("engine.criteria")
                    .with_list_parse_key("engine.alternatives")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid,
    /// including a term table override that fails term validation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.engine.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("FUZZY_AHP__ENGINE__CONSISTENCY_THRESHOLD");
        env::remove_var("FUZZY_AHP__ENGINE__CRITERIA");
        env::remove_var("FUZZY_AHP__ENGINE__ALTERNATIVES");
        env::remove_var("FUZZY_AHP__LOGGING__FILTER");
        env::remove_var("FUZZY_AHP__LOGGING__JSON");
    }

    fn write_config(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_sources() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.engine.consistency_threshold, 0.10);
        assert_eq!(config.engine.criteria.len(), 2);
        assert_eq!(config.engine.alternatives.len(), 2);
        assert!(config.engine.terms.is_none());
        assert_eq!(config.logging.filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("FUZZY_AHP__ENGINE__CONSISTENCY_THRESHOLD", "0.2");
        env::set_var("FUZZY_AHP__ENGINE__CRITERIA", "Cost,Quality,Speed");
        env::set_var("FUZZY_AHP__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.engine.consistency_threshold, 0.2);
        assert_eq!(config.engine.criteria, vec!["Cost", "Quality", "Speed"]);
        assert!(config.logging.json);
    }

    #[test]
    fn test_load_from_toml_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "engine.toml",
            r#"
[engine]
consistency_threshold = 0.15
criteria = ["Price", "Comfort"]
alternatives = ["Car A", "Car B", "Car C"]

[[engine.terms]]
id = 1
name = "Equal"
short_name = "EQ"
value = 1
l = 1.0
m = 1.0
u = 1.0

[[engine.terms]]
id = 2
name = "Strong"
short_name = "ST"
value = 5
l = 3.0
m = 5.0
u = 7.0

[logging]
filter = "fuzzy_ahp=debug"
"#,
        );

        let config = AppConfig::load_from(Some(&path)).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine.consistency_threshold, 0.15);
        assert_eq!(config.engine.alternatives.len(), 3);
        assert_eq!(config.engine.term_set().unwrap().len(), 2);
        assert_eq!(config.logging.filter, "fuzzy_ahp=debug");
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "engine.toml", "[engine]\nconsistency_threshold = 0.15\n");
        env::set_var("FUZZY_AHP__ENGINE__CONSISTENCY_THRESHOLD", "0.3");
        let result = AppConfig::load_from(Some(&path));
        clear_env();

        assert_eq!(result.unwrap().engine.consistency_threshold, 0.3);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_invalid_term_override_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "engine.json",
            r#"{"engine": {"terms": [
                {"id": 1, "name": "Equal", "short_name": "EQ", "value": 1, "l": 1.0, "m": 1.0, "u": 1.0}
            ]}}"#,
        );

        let config = AppConfig::load_from(Some(&path)).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTermTable(_))
        ));
    }
}
