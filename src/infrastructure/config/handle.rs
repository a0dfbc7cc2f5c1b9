use arc_swap::ArcSwap;
use figment::value::Value;
use figment::Figment;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::duration::parse_duration;
use super::error::ConfigError;
use super::loader::ConfigLoader;
use super::source::ConfigSource;
use crate::domain::models::Settings;

/// One immutable merged configuration tree.
///
/// A snapshot never changes after it is built; [`Config::reload`] replaces the
/// whole snapshot, so concurrent readers either see the old tree or the new
/// one, never a mix.
pub struct Snapshot {
    figment: Figment,
    settings: Settings,
}

/// Typed accessor over the merged configuration.
///
/// Keys are dotted paths (`"service.http.port"`). Reads after initialization
/// are lock-free; [`Config::reload`] recomputes the merge from the original
/// source list and swaps the snapshot in wholesale.
pub struct Config {
    sources: Vec<ConfigSource>,
    required: Vec<String>,
    snapshot: ArcSwap<Snapshot>,
}

impl Config {
    /// Merge `sources` and build a handle. Fails on malformed sources,
    /// invalid settings, or a missing required key.
    pub fn load(
        sources: Vec<ConfigSource>,
        required: Vec<String>,
    ) -> Result<Self, ConfigError> {
        let snapshot = Self::build(&sources, &required)?;
        Ok(Self {
            sources,
            required,
            snapshot: ArcSwap::from_pointee(snapshot),
        })
    }

    fn build(sources: &[ConfigSource], required: &[String]) -> Result<Snapshot, ConfigError> {
        let (figment, settings) = ConfigLoader::load(sources, required)?;
        Ok(Snapshot { figment, settings })
    }

    /// Recompute the merge from the original source list and swap the
    /// snapshot. On error the previous snapshot stays in place.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let snapshot = Self::build(&self.sources, &self.required)?;
        self.snapshot.store(Arc::new(snapshot));
        tracing::info!("configuration reloaded");
        Ok(())
    }

    /// The bootstrap layer's own typed settings from the current snapshot.
    pub fn settings(&self) -> Settings {
        self.snapshot.load().settings.clone()
    }

    /// Typed access to any key.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        self.get_as(key, std::any::type_name::<T>())
    }

    /// A string value.
    pub fn get_str(&self, key: &str) -> Result<String, ConfigError> {
        self.get_as(key, "string")
    }

    /// An integer value.
    pub fn get_i64(&self, key: &str) -> Result<i64, ConfigError> {
        self.get_as(key, "integer")
    }

    /// A floating-point value.
    pub fn get_f64(&self, key: &str) -> Result<f64, ConfigError> {
        self.get_as(key, "float")
    }

    /// A boolean value.
    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        self.get_as(key, "boolean")
    }

    /// A list of strings.
    pub fn get_strings(&self, key: &str) -> Result<Vec<String>, ConfigError> {
        self.get_as(key, "list of strings")
    }

    /// A duration: a string with a unit suffix (`250ms`, `30s`, `5m`, `2h`,
    /// `1d`) or a bare number of milliseconds.
    pub fn get_duration(&self, key: &str) -> Result<Duration, ConfigError> {
        let snapshot = self.snapshot.load();
        let value = snapshot
            .figment
            .find_value(key)
            .map_err(|_| ConfigError::MissingKey {
                key: key.to_string(),
            })?;

        match value {
            Value::String(_, raw) => {
                parse_duration(&raw).ok_or_else(|| ConfigError::InvalidDuration {
                    key: key.to_string(),
                    value: raw.clone(),
                })
            }
            Value::Num(..) => self
                .get_as::<u64>(key, "duration in milliseconds")
                .map(Duration::from_millis),
            other => Err(ConfigError::TypeMismatch {
                key: key.to_string(),
                expected: "duration string or milliseconds".to_string(),
                actual: describe_value(&other).to_string(),
            }),
        }
    }

    /// Whether any source defines `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.snapshot.load().figment.find_value(key).is_ok()
    }

    /// Which layer supplied the winning value for `key`, if the key exists.
    pub fn origin(&self, key: &str) -> Option<String> {
        let snapshot = self.snapshot.load();
        let value = snapshot.figment.find_value(key).ok()?;
        let metadata = snapshot.figment.get_metadata(value.tag())?;
        Some(match &metadata.source {
            Some(source) => format!("{} ({source})", metadata.name),
            None => metadata.name.to_string(),
        })
    }

    /// The whole resolved tree, for display and export.
    pub fn to_yaml_value(&self) -> Result<serde_yaml::Value, ConfigError> {
        self.snapshot
            .load()
            .figment
            .extract()
            .map_err(|err| ConfigError::ValidationFailed(err.to_string()))
    }

    fn get_as<T: DeserializeOwned>(&self, key: &str, expected: &str) -> Result<T, ConfigError> {
        let snapshot = self.snapshot.load();
        let value = snapshot
            .figment
            .find_value(key)
            .map_err(|_| ConfigError::MissingKey {
                key: key.to_string(),
            })?;
        snapshot
            .figment
            .extract_inner::<T>(key)
            .map_err(|_| ConfigError::TypeMismatch {
                key: key.to_string(),
                expected: expected.to_string(),
                actual: describe_value(&value).to_string(),
            })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layers: Vec<String> = self.sources.iter().map(ConfigSource::describe).collect();
        f.debug_struct("Config")
            .field("sources", &layers)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

fn describe_value(value: &Value) -> &'static str {
    match value {
        Value::String(..) => "string",
        Value::Char(..) => "char",
        Value::Bool(..) => "boolean",
        Value::Num(..) => "number",
        Value::Empty(..) => "empty",
        Value::Dict(..) => "table",
        Value::Array(..) => "list",
    }
}
