use std::path::PathBuf;
use thiserror::Error;

/// Configuration error types.
///
/// Configuration errors are fatal at startup: a process must not proceed on a
/// partially-loaded configuration. Messages name the offending key and, where
/// known, the source it came from.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("required key '{key}' is missing from every configuration source")]
    MissingKey { key: String },

    #[error("key '{key}' has the wrong type: expected {expected}, found {actual}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    #[error("failed to parse configuration source {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("required configuration file {path} does not exist")]
    MissingFile { path: PathBuf },

    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("environment variable '{name}' referenced by {path} is not set and has no fallback")]
    MissingEnvVar { name: String, path: PathBuf },

    #[error("key '{key}' holds '{value}', which is not a valid duration")]
    InvalidDuration { key: String, value: String },

    #[error("invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("configuration validation failed: {0}")]
    ValidationFailed(String),
}
