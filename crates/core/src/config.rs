//! Ingestion configuration: a JSON file plus environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use symgraph_ingest::{IngestConfig, StrategyOverride};
use tracing::debug;

use crate::error::{CoreError, Result};

pub const STRATEGY_ENV: &str = "SYMGRAPH_DECODE_STRATEGY";
pub const THREADS_ENV: &str = "SYMGRAPH_DECODE_THREADS";
pub const BATCH_SIZE_ENV: &str = "SYMGRAPH_SYMBOL_BATCH_SIZE";

/// `<config dir>/symgraph/config.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("symgraph").join("config.json"))
}

/// Loads the configuration from `path`, or from [`default_config_path`] when
/// that file exists, then applies the process environment on top.
pub fn load_config(path: Option<&Path>) -> Result<IngestConfig> {
    let path = resolve_config_path(path, default_config_path());
    load_config_with(path.as_deref(), |key| std::env::var(key).ok())
}

/// Reads `path` (defaults when `None`) and applies overrides from `lookup`.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<IngestConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => IngestConfig::default(),
    };
    apply_env_overrides(&mut config, lookup)?;
    Ok(config)
}

/// An explicit path always wins; the default is used only if it exists.
fn resolve_config_path(explicit: Option<&Path>, default: Option<PathBuf>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default.filter(|path| path.is_file()),
    }
}

pub fn read_config(path: &Path) -> Result<IngestConfig> {
    let bytes = fs::read(path)?;
    let config = serde_json::from_slice(&bytes)
        .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;
    debug!("loaded ingest config from {}", path.display());
    Ok(config)
}

/// Applies overrides read through `lookup`; unset or empty values are skipped.
pub fn apply_env_overrides<F>(config: &mut IngestConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(value) = get(STRATEGY_ENV) {
        config.strategy = value
            .parse::<StrategyOverride>()
            .map_err(|e| CoreError::Config(format!("{STRATEGY_ENV}: {e}")))?;
    }
    if let Some(value) = get(THREADS_ENV) {
        config.worker_threads = parse_count(THREADS_ENV, &value)?;
    }
    if let Some(value) = get(BATCH_SIZE_ENV) {
        let size = parse_count(BATCH_SIZE_ENV, &value)?;
        if size == 0 {
            return Err(CoreError::Config(format!(
                "{BATCH_SIZE_ENV} must be at least 1"
            )));
        }
        config.symbol_batch_size = size;
    }
    Ok(())
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|e| CoreError::Config(format!("{key}={value}: {e}")))
}
