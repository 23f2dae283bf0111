use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use symgraph_api::SYMBOL_GRAPH_SUFFIX;
use tracing::{debug, warn};

use crate::error::Result;

/// Every `*.symbols.json` file under `root`, sorted by path.
///
/// Hidden and git-ignored directories are walked too: build products such as
/// `.build/` usually live there.
pub fn collect_symbol_graph_files(root: &Path) -> Result<Vec<PathBuf>> {
    // Surface a missing root as an error instead of an empty batch.
    fs::metadata(root)?;

    let mut paths: Vec<PathBuf> = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(true)
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable entry under {}: {e}", root.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| is_symbol_graph_path(path))
        .collect();

    paths.sort();
    debug!(
        "found {} symbol graph files under {}",
        paths.len(),
        root.display()
    );
    Ok(paths)
}

pub fn is_symbol_graph_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(SYMBOL_GRAPH_SUFFIX) && name != SYMBOL_GRAPH_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_symbol_graph_path() {
        assert!(is_symbol_graph_path(Path::new("out/MyKit.symbols.json")));
        assert!(is_symbol_graph_path(Path::new("MyKit@Swift.symbols.json")));
        assert!(!is_symbol_graph_path(Path::new("MyKit.json")));
        assert!(!is_symbol_graph_path(Path::new("MyKit.symbols.json.bak")));
        assert!(!is_symbol_graph_path(Path::new(".symbols.json")));
    }

    #[test]
    fn test_collect_is_sorted_and_includes_hidden_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".build/ios")).unwrap();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join(".gitignore"), ".build/\n").unwrap();
        fs::write(root.join("b/Zeta.symbols.json"), "{}").unwrap();
        fs::write(root.join("b/notes.txt"), "").unwrap();
        fs::write(root.join(".build/ios/MyKit.symbols.json"), "{}").unwrap();
        fs::write(root.join("Alpha.symbols.json"), "{}").unwrap();

        let found = collect_symbol_graph_files(root).unwrap();
        assert_eq!(
            found,
            vec![
                root.join(".build/ios/MyKit.symbols.json"),
                root.join("Alpha.symbols.json"),
                root.join("b/Zeta.symbols.json"),
            ]
        );
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_symbol_graph_files(&dir.path().join("nope")).is_err());
    }
}
