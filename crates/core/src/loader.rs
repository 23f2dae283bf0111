//! Async entry points around the blocking [`SymbolGraphLoader`].

use std::path::PathBuf;

use symgraph_ingest::{IngestConfig, LoadReport, SymbolGraphFile, SymbolGraphLoader};

use crate::discovery::collect_symbol_graph_files;
use crate::error::{CoreError, Result};

/// Loads `files` on the blocking pool and returns the loaded iterator.
pub async fn load_symbol_graphs(
    files: Vec<SymbolGraphFile>,
    config: IngestConfig,
) -> Result<(SymbolGraphLoader, LoadReport)> {
    tokio::task::spawn_blocking(move || -> Result<(SymbolGraphLoader, LoadReport)> {
        let mut loader = SymbolGraphLoader::new(files, config);
        let report = loader.load_all()?;
        Ok((loader, report))
    })
    .await
    .map_err(|e| CoreError::Internal(e.to_string()))?
}

/// Discovers every symbol graph under `root` and loads them as one batch.
pub async fn load_directory(
    root: impl Into<PathBuf>,
    config: IngestConfig,
) -> Result<(SymbolGraphLoader, LoadReport)> {
    let root = root.into();
    let paths = tokio::task::spawn_blocking(move || collect_symbol_graph_files(&root))
        .await
        .map_err(|e| CoreError::Internal(e.to_string()))??;

    let files = paths.into_iter().map(SymbolGraphFile::on_disk).collect();
    load_symbol_graphs(files, config).await
}
