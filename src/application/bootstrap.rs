//! Process bootstrap: configuration plus logging, initialized together.
//!
//! The result of a bootstrap is an explicit [`Context`] object handed to
//! dependents. For processes that want a shared instance, the
//! [`Bootstrap::initialize_global`] entry point guards initialization behind
//! a one-time gate; every caller observes the same context and reads stay
//! lock-free afterwards.

use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::domain::models::Settings;
use crate::infrastructure::config::{Config, ConfigError, ConfigSource};
use crate::infrastructure::logging::{
    bridge_legacy_logging, LogPruner, Logger, LoggerHandle, LoggingError,
};

/// Directory holding the project-local configuration files.
pub const CONFIG_DIR: &str = ".groundwork";
/// Primary project configuration file.
pub const CONFIG_FILE: &str = ".groundwork/config.yaml";
/// Optional local override file, for per-machine tweaks kept out of review.
pub const LOCAL_FILE: &str = ".groundwork/local.yaml";
/// Environment prefix for configuration overrides.
pub const ENV_PREFIX: &str = "GROUNDWORK_";

static GLOBAL: OnceCell<Context> = OnceCell::new();

/// Bootstrap errors.
///
/// Configuration problems are fatal: a process must not start against a
/// partially-loaded configuration.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("logging initialization failed: {0}")]
    Logging(#[from] LoggingError),
}

/// A fully-initialized process context: configuration handle plus logging.
pub struct Context {
    config: Config,
    logger: Option<LoggerHandle>,
}

impl Context {
    /// The configuration handle.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The logging handle, absent when the bootstrap skipped logging setup.
    pub fn logger(&self) -> Option<&LoggerHandle> {
        self.logger.as_ref()
    }

    /// Consume the context, keeping only the configuration handle.
    pub fn into_config(self) -> Config {
        self.config
    }
}

/// Builder for process initialization.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    sources: Vec<ConfigSource>,
    required: Vec<String>,
    init_logging: bool,
    bridge_legacy: bool,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new()
    }
}

impl Bootstrap {
    /// An empty bootstrap: crate defaults only, logging enabled.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            required: Vec::new(),
            init_logging: true,
            bridge_legacy: true,
        }
    }

    /// The conventional layering for a standalone process:
    ///
    /// 1. crate defaults
    /// 2. `.groundwork/config.yaml` (project config, created by `init`)
    /// 3. `.groundwork/local.yaml` (optional local overrides)
    /// 4. `GROUNDWORK_*` environment variables (highest priority)
    pub fn standard() -> Self {
        Self::new()
            .source(ConfigSource::file(CONFIG_FILE))
            .source(ConfigSource::file(LOCAL_FILE))
            .source(ConfigSource::env(ENV_PREFIX))
    }

    /// Append a source layer. Later sources override earlier ones.
    pub fn source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Declare a key that must resolve after the merge.
    pub fn require(mut self, key: impl Into<String>) -> Self {
        self.required.push(key.into());
        self
    }

    /// Leave the process subscriber and legacy bridge untouched. The context
    /// then carries configuration only.
    pub fn skip_logging(mut self) -> Self {
        self.init_logging = false;
        self.bridge_legacy = false;
        self
    }

    /// Initialize logging but leave the legacy `log` facade alone.
    pub fn skip_legacy_bridge(mut self) -> Self {
        self.bridge_legacy = false;
        self
    }

    /// Run the bootstrap and hand back an owned context.
    pub fn initialize(self) -> Result<Context, BootstrapError> {
        let config = Config::load(self.sources, self.required)?;
        let settings: Settings = config.settings();

        let logger = if self.init_logging {
            let handle = Logger::init(&settings.logging)?;
            if let Some(log_dir) = &settings.logging.log_dir {
                LogPruner::new(settings.logging.retention_days).prune_best_effort(log_dir);
            }
            Some(handle)
        } else {
            None
        };

        if self.bridge_legacy {
            bridge_legacy_logging();
        }

        Ok(Context { config, logger })
    }

    /// Run the bootstrap at most once per process.
    ///
    /// Concurrent first calls race through a one-time gate: exactly one merge
    /// runs and every caller gets the same context. Later calls return the
    /// winner's context regardless of their own sources; reads are lock-free
    /// after the gate settles. A failed attempt leaves the gate open, so the
    /// next caller retries.
    pub fn initialize_global(self) -> Result<&'static Context, BootstrapError> {
        GLOBAL.get_or_try_init(|| self.initialize())
    }

    /// The already-initialized global context, if any.
    pub fn global() -> Option<&'static Context> {
        GLOBAL.get()
    }
}
