//! Command-line interface for inspecting and scaffolding configuration.

pub mod commands;
pub mod output;
pub mod types;

pub use output::{output, CommandOutput};
pub use types::{Cli, Commands, ConfigCommands};

/// Report a command failure and exit non-zero.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) {
    if json_mode {
        let payload = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_default()
        );
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(1);
}
