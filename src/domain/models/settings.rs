use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Settings for the bootstrap layer itself.
///
/// Consumers read their own keys through [`crate::Config::get`]; this struct
/// only types the sections the bootstrap layer acts on. Every field has a
/// serde default so an empty configuration tree is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingSettings {
    /// Default log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for stdout
    #[serde(default = "default_format")]
    pub format: LogFormat,

    /// Directory for log files (if unset, logs only to stdout)
    pub log_dir: Option<PathBuf>,

    /// Enable stdout logging
    #[serde(default = "default_true")]
    pub enable_stdout: bool,

    /// Log file rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,

    /// Number of days to retain rotated log files
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// Per-target severity overrides, keyed by logger namespace prefix.
    ///
    /// A route `"groundwork::config" -> "debug"` raises verbosity for that
    /// module subtree only; everything else stays at `level`.
    #[serde(default)]
    pub routes: BTreeMap<String, String>,
}

/// Stdout log format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Log file rotation policy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            log_dir: None,
            enable_stdout: default_true(),
            rotation: RotationPolicy::default(),
            retention_days: default_retention_days(),
            routes: BTreeMap::new(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_format() -> LogFormat {
    LogFormat::Json
}

const fn default_true() -> bool {
    true
}

const fn default_retention_days() -> u32 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert!(settings.logging.log_dir.is_none());
        assert!(settings.logging.enable_stdout);
        assert_eq!(settings.logging.rotation, RotationPolicy::Daily);
        assert_eq!(settings.logging.retention_days, 30);
        assert!(settings.logging.routes.is_empty());
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
logging:
  level: debug
  format: pretty
  log_dir: /var/log/groundwork
  rotation: hourly
  retention_days: 7
  routes:
    groundwork::config: trace
";
        let settings: Settings = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Pretty);
        assert_eq!(
            settings.logging.log_dir,
            Some(PathBuf::from("/var/log/groundwork"))
        );
        assert_eq!(settings.logging.rotation, RotationPolicy::Hourly);
        assert_eq!(settings.logging.retention_days, 7);
        assert_eq!(
            settings.logging.routes.get("groundwork::config").map(String::as_str),
            Some("trace")
        );
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let settings: Settings = serde_yaml::from_str("{}").expect("empty mapping should parse");
        assert_eq!(settings.logging.level, "info");
        assert!(settings.logging.enable_stdout);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result: Result<Settings, _> = serde_yaml::from_str("logging:\n  format: xml\n");
        assert!(result.is_err());
    }
}
