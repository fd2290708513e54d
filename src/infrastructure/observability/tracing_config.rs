use crate::presentation::config::{Environment, LoggingSettings};

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: Environment,
    pub default_filter: String,
    pub json_format: bool,
}

impl TracingConfig {
    /// `LOG_FORMAT=json` forces JSON output regardless of the settings file.
    pub fn from_settings(environment: Environment, logging: &LoggingSettings) -> Self {
        let json_from_env = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self {
            environment,
            default_filter: format!(
                "{},lexitutor=debug,tower_http=debug",
                logging.level
            ),
            json_format: logging.json || json_from_env,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            default_filter: "info,lexitutor=debug,tower_http=debug".to_string(),
            json_format: false,
        }
    }
}
