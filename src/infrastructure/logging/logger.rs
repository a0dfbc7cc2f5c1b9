use std::io;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, EnvFilter, Registry};

use super::routes::LogRoutes;
use crate::domain::models::{LogFormat, LoggingSettings, RotationPolicy};
use crate::infrastructure::config::ConfigError;

const LOG_FILE_NAME: &str = "groundwork.log";

/// Handle to the installed logging backend.
///
/// Owns the non-blocking appender guard (dropping it flushes and stops the
/// writer thread) and the filter reload handle used to replace the route
/// table wholesale.
pub struct LoggerHandle {
    reload: Option<reload::Handle<EnvFilter, Registry>>,
    _guard: Option<WorkerGuard>,
}

impl LoggerHandle {
    /// Replace the severity route table. The new table takes effect for all
    /// subsequent events; in-flight readers finish against the old one.
    pub fn set_routes(&self, routes: &LogRoutes) -> Result<(), LoggingError> {
        let filter = routes.build_filter()?;
        match &self.reload {
            Some(handle) => handle
                .reload(filter)
                .map_err(|err| LoggingError::ReloadFailed(err.to_string())),
            None => Err(LoggingError::ReloadUnavailable),
        }
    }

    /// Whether this handle controls the process subscriber. False when
    /// another subscriber was already installed at init time.
    pub fn controls_subscriber(&self) -> bool {
        self.reload.is_some()
    }
}

/// Logging subsystem errors. Unlike configuration errors these are never
/// startup-fatal.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error(transparent)]
    InvalidRoutes(#[from] ConfigError),

    #[error("route table replacement failed: {0}")]
    ReloadFailed(String),

    #[error("route reloading is unavailable: the process subscriber was installed elsewhere")]
    ReloadUnavailable,
}

/// Logger implementation using tracing.
pub struct Logger;

impl Logger {
    /// Install the process-wide subscriber from the given settings.
    ///
    /// The stdout layer honours `format`; the optional file layer is always
    /// JSON, written through a non-blocking rolling appender. If another
    /// global subscriber is already installed (embedding hosts, test
    /// harnesses), the existing one is left in place and the returned handle
    /// reports `controls_subscriber() == false`.
    pub fn init(settings: &LoggingSettings) -> Result<LoggerHandle, LoggingError> {
        let routes = LogRoutes::from_settings(settings);
        let env_filter = routes.filter_from_env()?;
        let (filter_layer, reload_handle) = reload::Layer::new(env_filter);
        let base = tracing_subscriber::registry().with(filter_layer);

        let (installed, guard) = if let Some(log_dir) = &settings.log_dir {
            let file_appender = match settings.rotation {
                RotationPolicy::Daily => rolling::daily(log_dir, LOG_FILE_NAME),
                RotationPolicy::Hourly => rolling::hourly(log_dir, LOG_FILE_NAME),
                RotationPolicy::Never => rolling::never(log_dir, LOG_FILE_NAME),
            };
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            // File layer - always JSON for structured logging
            let file_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_ansi(false)
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true);

            let installed = if settings.enable_stdout {
                match settings.format {
                    LogFormat::Json => base
                        .with(file_layer)
                        .with(
                            tracing_subscriber::fmt::layer()
                                .json()
                                .with_writer(io::stdout)
                                .with_current_span(true)
                                .with_span_list(true)
                                .with_target(true)
                                .with_thread_ids(true)
                                .with_file(true)
                                .with_line_number(true),
                        )
                        .try_init()
                        .is_ok(),
                    LogFormat::Pretty => base
                        .with(file_layer)
                        .with(
                            tracing_subscriber::fmt::layer()
                                .pretty()
                                .with_writer(io::stdout)
                                .with_target(true)
                                .with_thread_ids(true)
                                .with_file(true)
                                .with_line_number(true)
                                .with_span_events(FmtSpan::CLOSE),
                        )
                        .try_init()
                        .is_ok(),
                }
            } else {
                base.with(file_layer).try_init().is_ok()
            };

            (installed, Some(guard))
        } else if settings.enable_stdout {
            let installed = match settings.format {
                LogFormat::Json => base
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(io::stdout)
                            .with_current_span(true)
                            .with_span_list(true)
                            .with_target(true)
                            .with_thread_ids(true)
                            .with_file(true)
                            .with_line_number(true),
                    )
                    .try_init()
                    .is_ok(),
                LogFormat::Pretty => base
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(io::stdout)
                            .with_target(true)
                            .with_thread_ids(true)
                            .with_file(true)
                            .with_line_number(true)
                            .with_span_events(FmtSpan::CLOSE),
                    )
                    .try_init()
                    .is_ok(),
            };
            (installed, None)
        } else {
            (base.try_init().is_ok(), None)
        };

        if installed {
            tracing::info!(
                level = %settings.level,
                format = ?settings.format,
                file_output = settings.log_dir.is_some(),
                routes = settings.routes.len(),
                "logger initialized"
            );
        } else {
            tracing::debug!("global subscriber already installed, leaving it in place");
        }

        Ok(LoggerHandle {
            reload: installed.then_some(reload_handle),
            _guard: if installed { guard } else { None },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stdout_settings() -> LoggingSettings {
        LoggingSettings {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            ..LoggingSettings::default()
        }
    }

    #[test]
    fn test_logger_init_stdout_only() {
        // The first init in the test process wins; either way the handle is
        // usable and carries no file guard.
        let handle = Logger::init(&stdout_settings()).unwrap();
        let _controls = handle.controls_subscriber();
    }

    #[test]
    fn test_set_routes_on_detached_handle() {
        let detached = LoggerHandle {
            reload: None,
            _guard: None,
        };
        let routes = LogRoutes {
            default_level: "debug".to_string(),
            targets: std::collections::BTreeMap::new(),
        };
        assert!(matches!(
            detached.set_routes(&routes),
            Err(LoggingError::ReloadUnavailable)
        ));
    }

    #[test]
    fn test_init_rejects_invalid_level() {
        temp_env::with_var_unset(super::super::routes::LOG_ENV_VAR, || {
            let settings = LoggingSettings {
                level: "loud".to_string(),
                ..LoggingSettings::default()
            };
            assert!(Logger::init(&settings).is_err());
        });
    }

    // File-layer init conflicts with the global subscriber once another test
    // has installed one; covered by integration tests instead.
}
