use serde_json::json;
use std::fs;
use symgraph_core::ingest::{IngestConfig, SymbolGraphFile};
use symgraph_core::load_symbol_graphs;
use symgraph_core::logging::init_logging_in;

// Installs the global subscriber, so this binary holds a single test.
#[tokio::test]
async fn test_load_summary_is_written_to_component_log() {
    let tmp = tempfile::tempdir().unwrap();
    let guard = init_logging_in(tmp.path(), "ingest", false).unwrap();
    assert!(init_logging_in(tmp.path(), "ingest", false).is_err());

    let graph = json!({
        "metadata": {"formatVersion": {"major": 0, "minor": 6}, "generator": "test"},
        "module": {"name": "MyKit", "platform": {}},
        "symbols": [{
            "kind": {"identifier": "swift.struct", "displayName": "Structure"},
            "identifier": {"precise": "s:5MyKit4ItemV", "interfaceLanguage": "swift"},
            "pathComponents": ["Item"],
            "names": {"title": "Item"}
        }],
        "relationships": []
    });
    let files = vec![SymbolGraphFile::in_memory(
        "MyKit.symbols.json",
        serde_json::to_vec(&graph).unwrap(),
    )];
    load_symbol_graphs(files, IngestConfig::default())
        .await
        .unwrap();
    drop(guard);

    let logs: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(logs.len(), 1);
    let contents = fs::read_to_string(&logs[0]).unwrap();
    assert!(contents.contains("loaded 1 symbol graphs into 1 module graphs"));
    assert!(contents.contains("symgraph_ingest"));
}
