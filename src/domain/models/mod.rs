pub mod settings;

pub use settings::{LogFormat, LoggingSettings, RotationPolicy, Settings};
