//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - ordered source layering (defaults, YAML files, environment)
//! - `${VAR}` substitution in file sources
//! - typed dotted-key access with provenance
//! - copy-on-write snapshot replacement on reload

pub mod duration;
pub mod error;
pub mod handle;
pub mod interpolate;
pub mod loader;
pub mod source;

pub use error::ConfigError;
pub use handle::Config;
pub use loader::ConfigLoader;
pub use source::ConfigSource;
