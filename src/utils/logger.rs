// Logger initialization
//
// CLI commands log to stderr. The TUI owns the terminal, so it logs to a
// daily rolling file instead.

use crate::config::Config;
use crate::types::{SpyError, SpyResult};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_LOG_FILTER: &str = "weaviate_spy=info";

const LOG_FILE_PREFIX: &str = "weaviate-spy.log";

/// RUST_LOG first, then the configured filter, then the default
pub fn env_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        configured
            .and_then(|f| EnvFilter::try_new(f).ok())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.into())
    })
}

pub fn init_cli_logging(config: &Config) {
    tracing_subscriber::registry()
        .with(env_filter(config.log_filter.as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Keep the returned guard alive until exit or buffered lines are lost
pub fn init_tui_logging(config: &Config) -> SpyResult<WorkerGuard> {
    let dir = log_dir(config);
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter(config.log_filter.as_deref()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| SpyError::Config(format!("Failed to install logger: {}", e)))?;

    Ok(guard)
}

pub fn log_dir(config: &Config) -> PathBuf {
    config.log_dir.clone().unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("weaviate-spy")
            .join("logs")
    })
}
