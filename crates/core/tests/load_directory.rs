use serde_json::json;
use std::fs;
use std::path::Path;
use symgraph_core::ingest::{
    DecodingStrategy, IngestConfig, IngestError, StrategyOverride, SymbolGraphFile,
};
use symgraph_core::{CoreError, load_directory, load_symbol_graphs};

fn write_graph(path: &Path, module: &str, environment: Option<&str>, symbols: &[&str]) {
    let symbols: Vec<_> = symbols
        .iter()
        .map(|id| {
            json!({
                "kind": {"identifier": "swift.class", "displayName": "Class"},
                "identifier": {"precise": id, "interfaceLanguage": "swift"},
                "pathComponents": [id],
                "names": {"title": id},
                "availability": [{"domain": environment.unwrap_or("iOS"), "introduced": {"major": 15}}]
            })
        })
        .collect();
    let mut platform = json!({"operatingSystem": {"name": "ios"}});
    if let Some(environment) = environment {
        platform["environment"] = json!(environment);
    }
    let graph = json!({
        "metadata": {"formatVersion": {"major": 0, "minor": 6}, "generator": "test"},
        "module": {"name": module, "platform": platform},
        "symbols": symbols,
        "relationships": []
    });
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_vec_pretty(&graph).unwrap()).unwrap();
}

#[tokio::test]
async fn test_load_directory_merges_platform_variants() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_graph(&root.join("ios/MyKit.symbols.json"), "MyKit", None, &["c:A", "c:B"]);
    write_graph(
        &root.join("catalyst/MyKit.symbols.json"),
        "MyKit",
        Some("macabi"),
        &["c:A"],
    );
    write_graph(&root.join("ios/MyKit@Swift.symbols.json"), "MyKit", None, &["s:ext"]);
    fs::write(root.join("ios/README.md"), "not a graph").unwrap();

    let config = IngestConfig {
        strategy: StrategyOverride::Parallel,
        ..IngestConfig::default()
    };
    let (mut loader, report) = load_directory(root, config).await.unwrap();
    assert_eq!(report.files, 3);
    assert_eq!(report.graphs, 2);
    assert_eq!(report.overlays_applied, 1);
    assert_eq!(report.overlay_items_added, 1);

    let (main, is_main) = loader.next_graph().unwrap();
    assert!(is_main);
    assert_eq!(main.module_name(), "MyKit");
    assert_eq!(main.base_path, root.join("ios/MyKit.symbols.json"));
    let availability = main.symbol("c:A").unwrap().availability().unwrap().unwrap();
    assert!(availability.contains_domain(Some("iOS")));
    assert!(availability.contains_domain(Some("macabi")));

    let (extension, is_main) = loader.next_graph().unwrap();
    assert!(!is_main);
    assert_eq!(extension.module_name(), "Swift");
    assert!(loader.next_graph().is_none());
}

#[tokio::test]
async fn test_load_symbol_graphs_from_memory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Solo.symbols.json");
    write_graph(&path, "Solo", None, &["s:one", "s:two"]);
    let bytes = fs::read(&path).unwrap();

    let files = vec![SymbolGraphFile::in_memory("Solo.symbols.json", bytes)];
    let (loader, report) = load_symbol_graphs(files, IngestConfig::default())
        .await
        .unwrap();
    assert_eq!(report.graphs, 1);
    assert_eq!(report.strategy, DecodingStrategy::PerFileBatchedSymbols);
    assert_eq!(loader.graphs()[0].symbols.len(), 2);
}

#[tokio::test]
async fn test_malformed_graph_surfaces_ingest_error() {
    let dir = tempfile::tempdir().unwrap();
    write_graph(&dir.path().join("Good.symbols.json"), "Good", None, &["a"]);
    fs::write(dir.path().join("Bad.symbols.json"), "{\"metadata\":").unwrap();

    let err = load_directory(dir.path(), IngestConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Ingest(IngestError::Decode { .. })));
}

#[tokio::test]
async fn test_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_directory(dir.path().join("absent"), IngestConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Io(_)));
}
