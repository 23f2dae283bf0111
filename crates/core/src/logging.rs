//! Process-wide tracing setup for tools embedding the loader.
//!
//! Ingestion logs go to a daily-rolling file per component; stderr output is
//! optional. `RUST_LOG` overrides [`DEFAULT_FILTER`].

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CoreError, Result};

pub const LOG_DIR_ENV: &str = "SYMGRAPH_LOG_DIR";

/// Load summaries from the symgraph crates, warnings from everything else.
pub const DEFAULT_FILTER: &str = "warn,symgraph_ingest=info,symgraph_core=info";

/// `$SYMGRAPH_LOG_DIR`, or `~/.symgraph/logs`.
pub fn log_dir() -> PathBuf {
    resolve_log_dir(|key| std::env::var_os(key), dirs::home_dir())
}

fn resolve_log_dir<F>(lookup: F, home: Option<PathBuf>) -> PathBuf
where
    F: Fn(&str) -> Option<OsString>,
{
    if let Some(dir) = lookup(LOG_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    home.unwrap_or_else(|| PathBuf::from("."))
        .join(".symgraph")
        .join("logs")
}

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Non-blocking writer rolling daily under `dir`, with files named
/// `<component>.<date>`. Logs are flushed when the guard drops.
pub fn file_writer(dir: &Path, component: &str) -> Result<(NonBlocking, WorkerGuard)> {
    fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::daily(dir, component);
    Ok(tracing_appender::non_blocking(appender))
}

/// Installs the global subscriber logging into [`log_dir`].
pub fn init_logging(component: &str, to_stderr: bool) -> Result<WorkerGuard> {
    init_logging_in(&log_dir(), component, to_stderr)
}

/// Like [`init_logging`] with an explicit directory. Fails if a global
/// subscriber is already installed.
pub fn init_logging_in(dir: &Path, component: &str, to_stderr: bool) -> Result<WorkerGuard> {
    let (writer, guard) = file_writer(dir, component)?;

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);
    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| CoreError::Internal(format!("failed to install logging: {e}")))?;

    Ok(guard)
}
