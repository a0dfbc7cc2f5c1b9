//! Groundwork - Process Bootstrap Layer
//!
//! Groundwork gives the processes of a larger system one entry point for
//! layered configuration and unified structured logging: merge ordered
//! configuration sources into an immutable snapshot, read values through a
//! typed dotted-key accessor, route all log output (including records from
//! the legacy `log` facade) into one tracing backend.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): typed settings models
//! - **Application Layer** (`application`): bootstrap context and one-time gate
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging adapters
//! - **CLI Layer** (`cli`): the `groundwork` inspection binary
//!
//! # Example
//!
//! ```no_run
//! use groundwork::Bootstrap;
//!
//! fn main() -> anyhow::Result<()> {
//!     let context = Bootstrap::standard()
//!         .require("service.name")
//!         .initialize()?;
//!
//!     let name = context.config().get_str("service.name")?;
//!     tracing::info!(service = %name, "starting");
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use application::{Bootstrap, BootstrapError, Context};
pub use domain::models::{LogFormat, LoggingSettings, RotationPolicy, Settings};
pub use infrastructure::config::{Config, ConfigError, ConfigLoader, ConfigSource};
pub use infrastructure::logging::{
    bridge_legacy_logging, BridgeStatus, LogPruner, LogRoutes, Logger, LoggerHandle, LoggingError,
};
