//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands;

#[derive(Parser)]
#[command(name = "groundwork")]
#[command(about = "Groundwork - layered configuration and logging bootstrap", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Use this configuration file instead of .groundwork/config.yaml
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the .groundwork configuration directory
    Init(commands::init::InitArgs),

    /// Inspect and validate the resolved configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the fully resolved configuration tree
    Show {
        /// Include the source layer that supplied each value
        #[arg(short, long)]
        origin: bool,
    },

    /// Print a single resolved value
    Get {
        /// Dotted key, e.g. logging.level
        key: String,
    },

    /// Load the configuration and report whether it is valid
    Validate {
        /// Keys that must be present
        #[arg(short, long, value_delimiter = ',')]
        require: Vec<String>,
    },
}
