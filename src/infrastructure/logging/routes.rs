//! Severity routing for logger namespaces.
//!
//! A route table maps logger-namespace prefixes to severity thresholds, with
//! one default level for everything unmatched. The table compiles into an
//! `EnvFilter` and is replaced wholesale on reconfiguration; readers never see
//! a half-updated table.

use std::collections::BTreeMap;

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::domain::models::LoggingSettings;
use crate::infrastructure::config::ConfigError;

/// Environment variable that overrides the configured routes entirely,
/// using `EnvFilter` directive syntax.
pub const LOG_ENV_VAR: &str = "GROUNDWORK_LOG";

/// A severity routing table: default level plus per-target overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRoutes {
    /// Threshold for targets with no matching route.
    pub default_level: String,
    /// Per-target thresholds, keyed by logger namespace prefix.
    pub targets: BTreeMap<String, String>,
}

impl LogRoutes {
    /// Build the table from settings.
    pub fn from_settings(settings: &LoggingSettings) -> Self {
        Self {
            default_level: settings.level.clone(),
            targets: settings.routes.clone(),
        }
    }

    /// Render the table as an `EnvFilter` directive string,
    /// e.g. `info,groundwork::config=debug`.
    pub fn directives(&self) -> String {
        let mut parts = vec![self.default_level.to_lowercase()];
        for (target, level) in &self.targets {
            parts.push(format!("{}={}", target, level.to_lowercase()));
        }
        parts.join(",")
    }

    /// Compile the table into a filter.
    pub fn build_filter(&self) -> Result<EnvFilter, ConfigError> {
        parse_level(&self.default_level)?;
        for level in self.targets.values() {
            parse_level(level)?;
        }
        EnvFilter::try_new(self.directives())
            .map_err(|err| ConfigError::ValidationFailed(format!("invalid log routes: {err}")))
    }

    /// Compile the table, letting the `GROUNDWORK_LOG` environment variable
    /// take precedence when set.
    pub fn filter_from_env(&self) -> Result<EnvFilter, ConfigError> {
        match std::env::var(LOG_ENV_VAR) {
            Ok(directives) if !directives.is_empty() => EnvFilter::try_new(&directives)
                .map_err(|err| {
                    ConfigError::ValidationFailed(format!(
                        "invalid {LOG_ENV_VAR} directives '{directives}': {err}"
                    ))
                }),
            _ => self.build_filter(),
        }
    }
}

/// Parse a log level string to a [`Level`].
pub fn parse_level(level: &str) -> Result<Level, ConfigError> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(ConfigError::InvalidLogLevel(level.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert!(matches!(parse_level("trace"), Ok(Level::TRACE)));
        assert!(matches!(parse_level("debug"), Ok(Level::DEBUG)));
        assert!(matches!(parse_level("info"), Ok(Level::INFO)));
        assert!(matches!(parse_level("warn"), Ok(Level::WARN)));
        assert!(matches!(parse_level("error"), Ok(Level::ERROR)));
        assert!(matches!(parse_level("INFO"), Ok(Level::INFO)));
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn test_directives_rendering() {
        let mut targets = BTreeMap::new();
        targets.insert("groundwork::config".to_string(), "DEBUG".to_string());
        targets.insert("app::db".to_string(), "trace".to_string());

        let routes = LogRoutes {
            default_level: "info".to_string(),
            targets,
        };

        // BTreeMap ordering keeps the rendering deterministic.
        assert_eq!(
            routes.directives(),
            "info,app::db=trace,groundwork::config=debug"
        );
    }

    #[test]
    fn test_build_filter_accepts_valid_table() {
        let routes = LogRoutes {
            default_level: "warn".to_string(),
            targets: BTreeMap::new(),
        };
        assert!(routes.build_filter().is_ok());
    }

    #[test]
    fn test_build_filter_rejects_bad_level() {
        let mut targets = BTreeMap::new();
        targets.insert("app".to_string(), "loud".to_string());
        let routes = LogRoutes {
            default_level: "info".to_string(),
            targets,
        };
        assert!(routes.build_filter().is_err());
    }

    #[test]
    fn test_env_var_takes_precedence() {
        temp_env::with_var(LOG_ENV_VAR, Some("trace"), || {
            let routes = LogRoutes {
                default_level: "error".to_string(),
                targets: BTreeMap::new(),
            };
            let filter = routes.filter_from_env().unwrap();
            assert!(filter.to_string().contains("trace"));
            assert!(!filter.to_string().contains("error"));
        });
    }

    #[test]
    fn test_from_settings_copies_routes() {
        let mut settings = LoggingSettings::default();
        settings
            .routes
            .insert("app::db".to_string(), "debug".to_string());
        let routes = LogRoutes::from_settings(&settings);
        assert_eq!(routes.default_level, "info");
        assert_eq!(routes.targets.len(), 1);
    }
}
