//! Implementation of the `groundwork config` subcommands.

use anyhow::{Context as _, Result};
use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use std::path::PathBuf;

use crate::application::Bootstrap;
use crate::cli::output::{output, CommandOutput};
use crate::cli::types::ConfigCommands;
use crate::infrastructure::config::{Config, ConfigSource};

pub fn execute(command: ConfigCommands, config_path: Option<PathBuf>, json_mode: bool) -> Result<()> {
    match command {
        ConfigCommands::Show { origin } => show(config_path, origin, json_mode),
        ConfigCommands::Get { key } => get(config_path, &key, json_mode),
        ConfigCommands::Validate { require } => validate(config_path, require, json_mode),
    }
}

/// Build the bootstrap for inspection commands. The CLI keeps its own stderr
/// logging, so the library-side logging setup is skipped.
fn build_bootstrap(config_path: Option<PathBuf>) -> Bootstrap {
    let bootstrap = match config_path {
        Some(path) => Bootstrap::new()
            .source(ConfigSource::file_required(path))
            .source(ConfigSource::env(
                crate::application::bootstrap::ENV_PREFIX,
            )),
        None => Bootstrap::standard(),
    };
    bootstrap.skip_logging()
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let context = build_bootstrap(config_path)
        .initialize()
        .context("Failed to load configuration")?;
    Ok(context.into_config())
}

// comfy-table rows for every leaf of the resolved tree.
fn flatten(value: &serde_yaml::Value, prefix: &str, rows: &mut Vec<(String, String)>) {
    match value {
        serde_yaml::Value::Mapping(mapping) => {
            for (k, v) in mapping {
                let name = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    other => serde_yaml::to_string(other)
                        .unwrap_or_default()
                        .trim()
                        .to_string(),
                };
                let child = if prefix.is_empty() {
                    name
                } else {
                    format!("{prefix}.{name}")
                };
                flatten(v, &child, rows);
            }
        }
        scalar => {
            let rendered = serde_yaml::to_string(scalar)
                .unwrap_or_default()
                .trim_end()
                .to_string();
            rows.push((prefix.to_string(), rendered));
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct ShowOutput {
    resolved: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    origins: Option<Vec<(String, String)>>,
    #[serde(skip)]
    rendered: String,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        self.rendered.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn show(config_path: Option<PathBuf>, origin: bool, json_mode: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let tree = config.to_yaml_value().context("Failed to render configuration")?;

    let mut rows = Vec::new();
    flatten(&tree, "", &mut rows);

    let (rendered, origins) = if origin {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Key").add_attribute(Attribute::Bold),
                Cell::new("Value").add_attribute(Attribute::Bold),
                Cell::new("Origin").add_attribute(Attribute::Bold),
            ]);

        let mut origins = Vec::new();
        for (key, value) in &rows {
            let layer = config.origin(key).unwrap_or_else(|| "-".to_string());
            table.add_row(vec![key.clone(), value.clone(), layer.clone()]);
            origins.push((key.clone(), layer));
        }
        (table.to_string(), Some(origins))
    } else {
        (
            serde_yaml::to_string(&tree).context("Failed to render configuration as YAML")?,
            None,
        )
    };

    let output_data = ShowOutput {
        resolved: serde_json::to_value(&tree).context("Failed to render configuration as JSON")?,
        origins,
        rendered,
    };
    output(&output_data, json_mode);
    Ok(())
}

#[derive(Debug, serde::Serialize)]
struct GetOutput {
    key: String,
    value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<String>,
}

impl CommandOutput for GetOutput {
    fn to_human(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn get(config_path: Option<PathBuf>, key: &str, json_mode: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let value: serde_json::Value = config.get(key)?;
    let output_data = GetOutput {
        key: key.to_string(),
        value,
        origin: config.origin(key),
    };
    output(&output_data, json_mode);
    Ok(())
}

#[derive(Debug, serde::Serialize)]
struct ValidateOutput {
    valid: bool,
    checked_keys: Vec<String>,
}

impl CommandOutput for ValidateOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "{} configuration is valid",
            console::style("ok:").green().bold()
        )];
        if !self.checked_keys.is_empty() {
            lines.push(format!("Required keys present: {}", self.checked_keys.join(", ")));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn validate(config_path: Option<PathBuf>, require: Vec<String>, json_mode: bool) -> Result<()> {
    let mut bootstrap = build_bootstrap(config_path);
    for key in &require {
        bootstrap = bootstrap.require(key.clone());
    }
    bootstrap
        .initialize()
        .context("Configuration is invalid")?;

    let output_data = ValidateOutput {
        valid: true,
        checked_keys: require,
    };
    output(&output_data, json_mode);
    Ok(())
}
