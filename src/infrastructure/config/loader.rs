use figment::providers::{Env, Format, Serialized, Yaml};
use figment::value::{Dict, Map};
use figment::{Figment, Metadata, Profile, Provider};
use std::fs;
use std::path::PathBuf;

use super::error::ConfigError;
use super::interpolate;
use super::source::ConfigSource;
use crate::domain::models::Settings;
use crate::infrastructure::logging::routes::parse_level;

/// A YAML file layer with `${VAR}` references already expanded.
///
/// Wrapping the expanded text in our own provider keeps the file path in the
/// layer's metadata, so provenance and error output can name the file.
struct ExpandedYaml {
    path: PathBuf,
    text: String,
}

impl Provider for ExpandedYaml {
    fn metadata(&self) -> Metadata {
        Metadata::named(format!("YAML file {}", self.path.display()))
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Yaml::string(&self.text).data()
    }
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Merge the given sources in priority order.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic crate defaults (Serialized)
    /// 2. The given sources, in order: later entries override earlier ones
    ///    for the same key
    ///
    /// File sources are checked for well-formedness eagerly so a malformed
    /// document fails here, naming its file, rather than at first access.
    pub fn merge(sources: &[ConfigSource]) -> Result<Figment, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));

        for source in sources {
            figment = match source {
                ConfigSource::Defaults(value) => {
                    figment.merge(Serialized::defaults(value.clone()))
                }
                ConfigSource::File { path, required } => {
                    if !path.exists() {
                        if *required {
                            return Err(ConfigError::MissingFile { path: path.clone() });
                        }
                        tracing::debug!(path = %path.display(), "optional config file absent, skipping");
                        continue;
                    }
                    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                        path: path.clone(),
                        source,
                    })?;
                    let text = interpolate::expand(&raw, path)?;
                    check_well_formed(&text, path)?;
                    figment.merge(ExpandedYaml {
                        path: path.clone(),
                        text,
                    })
                }
                ConfigSource::Env { prefix } => {
                    figment.merge(Env::prefixed(prefix).split("__"))
                }
                ConfigSource::Yaml(document) => {
                    check_well_formed(document, &PathBuf::from("<inline>"))?;
                    figment.merge(Yaml::string(document))
                }
            };
        }

        Ok(figment)
    }

    /// Merge, extract the typed settings, and enforce required keys.
    pub fn load(
        sources: &[ConfigSource],
        required_keys: &[String],
    ) -> Result<(Figment, Settings), ConfigError> {
        let figment = Self::merge(sources)?;

        let settings: Settings = figment
            .extract()
            .map_err(|err| ConfigError::ValidationFailed(err.to_string()))?;
        Self::validate(&settings)?;

        for key in required_keys {
            if figment.find_value(key).is_err() {
                return Err(ConfigError::MissingKey { key: key.clone() });
            }
        }

        Ok((figment, settings))
    }

    /// Validate settings after merging.
    pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
        parse_level(&settings.logging.level)?;

        for (target, level) in &settings.logging.routes {
            if target.is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "logging route target cannot be empty".to_string(),
                ));
            }
            parse_level(level).map_err(|_| {
                ConfigError::ValidationFailed(format!(
                    "logging route '{target}' has invalid level '{level}'"
                ))
            })?;
        }

        if settings.logging.retention_days == 0 {
            return Err(ConfigError::ValidationFailed(
                "logging.retention_days must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_well_formed(text: &str, path: &std::path::Path) -> Result<(), ConfigError> {
    serde_yaml::from_str::<serde_yaml::Value>(text).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    Ok(())
}
