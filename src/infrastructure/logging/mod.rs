//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - stdout layer (json or pretty) plus optional JSON file layer
//! - per-namespace severity routes, replaceable at runtime
//! - bridge for the legacy `log` facade
//! - retention cleanup for rotated files

pub mod bridge;
pub mod logger;
pub mod rotation;
pub mod routes;

pub use bridge::{bridge_legacy_logging, BridgeStatus};
pub use logger::{Logger, LoggerHandle, LoggingError};
pub use rotation::LogPruner;
pub use routes::{parse_level, LogRoutes, LOG_ENV_VAR};
