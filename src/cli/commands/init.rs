//! Implementation of the `groundwork init` command.

use anyhow::{Context as _, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use crate::application::bootstrap::{CONFIG_DIR, ENV_PREFIX};
use crate::cli::output::{output, CommandOutput};

/// Default configuration template content
const DEFAULT_CONFIG_TEMPLATE: &str = r"# Groundwork Configuration
# Override settings by editing this file, adding .groundwork/local.yaml,
# or setting environment variables with the GROUNDWORK_ prefix.
#
# Example environment variables:
#   export GROUNDWORK_LOGGING__LEVEL=debug
#   export GROUNDWORK_LOGGING__FORMAT=pretty
#
# Values may reference environment variables:
#   api_key: ${SERVICE_API_KEY}
#   region: ${SERVICE_REGION:-eu-west-1}

# Logging configuration
logging:
  # Default log level: trace, debug, info, warn, error
  level: info

  # Stdout format: json, pretty
  format: json

  # Uncomment to also write JSON logs to rotated files
  # log_dir: .groundwork/logs

  # Rotation policy for file output: daily, hourly, never
  rotation: daily

  # Days to keep rotated log files
  retention_days: 30

  # Per-namespace severity overrides
  routes: {}
  #  mycrate::db: debug
";

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force reinitialization even if already initialized
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub config_file: PathBuf,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        if self.success {
            format!(
                "{}\n\nConfiguration written to {}\nOverride via .groundwork/local.yaml or {}* environment variables.",
                self.message,
                self.config_file.display(),
                ENV_PREFIX
            )
        } else {
            self.message.clone()
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let target_path = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.path)
    };

    let config_dir = target_path.join(CONFIG_DIR);
    let config_file = config_dir.join("config.yaml");

    if config_file.exists() && !args.force {
        let output_data = InitOutput {
            success: false,
            message: "Already initialized. Use --force to overwrite the config file.".to_string(),
            config_file,
        };
        output(&output_data, json_mode);
        return Ok(());
    }

    fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create {}", config_dir.display()))?;
    fs::write(&config_file, DEFAULT_CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", config_file.display()))?;

    let output_data = InitOutput {
        success: true,
        message: if args.force {
            "Reinitialized configuration.".to_string()
        } else {
            "Initialized configuration.".to_string()
        },
        config_file,
    };
    output(&output_data, json_mode);
    Ok(())
}
