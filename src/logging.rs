//! Logging setup
//!
//! The TUI owns the terminal, so events go to a daily rolling file under
//! `<home>/logs/` rather than stderr. `RUST_LOG` wins over the configured
//! level.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

const LOG_FILE_PREFIX: &str = "schemascribe.log";

/// Logging setup errors
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to create log directory {path}: {source}")]
    LogDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install subscriber: {0}")]
    Install(String),
}

/// Filter from `RUST_LOG`, falling back to `default_level`
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to `log_dir`
///
/// The returned guard flushes pending events on drop; hold it for the
/// lifetime of the process.
pub fn init_logging(log_dir: &Path, config: &LoggingConfig) -> Result<WorkerGuard, LoggingError> {
    std::fs::create_dir_all(log_dir).map_err(|source| LoggingError::LogDir {
        path: log_dir.display().to_string(),
        source,
    })?;

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_timer(UtcTime::rfc_3339());
    let registry = tracing_subscriber::registry().with(env_filter(&config.level));

    let installed = if config.json {
        registry.with(fmt_layer.json()).try_init()
    } else {
        registry.with(fmt_layer).try_init()
    };
    installed.map_err(|e| LoggingError::Install(e.to_string()))?;

    Ok(guard)
}
