//! Environment-variable substitution for file sources.
//!
//! `${VAR}` in a configuration file expands to the value of `VAR`;
//! `${VAR:-fallback}` expands to `fallback` when `VAR` is unset. Expansion
//! runs over the raw document text before parsing, so substituted values pass
//! through the normal YAML type rules. Full-line comments are left untouched,
//! so commented-out examples never need their variables set.

use std::env;
use std::path::Path;

use super::error::ConfigError;

/// Expand `${VAR}` references in `raw`. `path` names the file in errors.
pub fn expand(raw: &str, path: &Path) -> Result<String, ConfigError> {
    let mut lines = Vec::new();
    for line in raw.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }
        let expanded = shellexpand::env_with_context(line, lookup).map_err(|err| {
            ConfigError::MissingEnvVar {
                name: err.cause.0,
                path: path.to_path_buf(),
            }
        })?;
        lines.push(expanded.into_owned());
    }

    let mut out = lines.join("\n");
    if raw.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// Error carrier for an unresolvable variable name.
#[derive(Debug)]
pub struct UnsetVar(pub String);

impl std::fmt::Display for UnsetVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "environment variable '{}' is not set", self.0)
    }
}

impl std::error::Error for UnsetVar {}

// shellexpand hands us the raw text between the braces, so the fallback
// syntax is parsed here rather than by the library.
fn lookup(name: &str) -> Result<Option<String>, UnsetVar> {
    if let Some((var, fallback)) = name.split_once(":-") {
        match env::var(var) {
            Ok(value) => Ok(Some(value)),
            Err(_) => Ok(Some(fallback.to_string())),
        }
    } else {
        match env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(UnsetVar(name.to_string())),
        }
    }
}
