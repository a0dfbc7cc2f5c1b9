//! Domain layer for the bootstrap system.
//!
//! This module contains the typed models shared across the crate.

pub mod models;

pub use models::{LogFormat, LoggingSettings, RotationPolicy, Settings};
