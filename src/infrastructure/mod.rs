//! Infrastructure layer module
//!
//! This module contains the adapters the bootstrap layer is built from:
//! - Configuration management (layered sources, typed access, reload)
//! - Logging infrastructure (subscriber setup, routes, legacy bridge)

pub mod config;
pub mod logging;
