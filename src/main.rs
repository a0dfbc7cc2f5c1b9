//! Groundwork CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use groundwork::cli::{handle_error, Cli, Commands};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init(args) => groundwork::cli::commands::init::execute(args, cli.json),
        Commands::Config(args) => {
            groundwork::cli::commands::config::execute(args, cli.config.clone(), cli.json)
        }
    };

    if let Err(err) = result {
        handle_error(&err, cli.json);
    }
}
