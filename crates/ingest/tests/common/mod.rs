use serde_json::{Value, json};
use std::sync::Arc;
use symgraph_ingest::{
    DecodingStrategy, FixedStrategy, IngestConfig, MergedModuleGraph, SymbolGraphFile,
    SymbolGraphLoader,
};

pub const BOTH_STRATEGIES: [DecodingStrategy; 2] = [
    DecodingStrategy::PerFileBatchedSymbols,
    DecodingStrategy::WholeFileFullParallel,
];

#[allow(dead_code)]
pub fn symbol(id: &str) -> Value {
    json!({
        "kind": {"identifier": "swift.func", "displayName": "Function"},
        "identifier": {"precise": id, "interfaceLanguage": "swift"},
        "pathComponents": [format!("{id}()")],
        "names": {"title": format!("{id}()")},
        "accessLevel": "public",
        "declarationFragments": [
            {"kind": "keyword", "spelling": "func"},
            {"kind": "text", "spelling": " "},
            {"kind": "identifier", "spelling": id}
        ]
    })
}

#[allow(dead_code)]
pub fn async_symbol(id: &str) -> Value {
    let mut symbol = symbol(id);
    symbol["declarationFragments"] = json!([
        {"kind": "keyword", "spelling": "func"},
        {"kind": "text", "spelling": " "},
        {"kind": "identifier", "spelling": id},
        {"kind": "text", "spelling": "() "},
        {"kind": "keyword", "spelling": "async"}
    ]);
    symbol
}

#[allow(dead_code)]
pub fn with_availability(mut symbol: Value, availability: Value) -> Value {
    symbol["availability"] = availability;
    symbol
}

#[allow(dead_code)]
pub fn graph(module: &str, symbols: Vec<Value>) -> Value {
    let relationships: Vec<Value> = symbols
        .windows(2)
        .map(|pair| {
            json!({
                "kind": "memberOf",
                "source": pair[1]["identifier"]["precise"],
                "target": pair[0]["identifier"]["precise"]
            })
        })
        .collect();

    json!({
        "metadata": {
            "formatVersion": {"major": 0, "minor": 6, "patch": 0},
            "generator": "symgraph-tests"
        },
        "module": {
            "name": module,
            "platform": {
                "architecture": "arm64",
                "vendor": "apple",
                "operatingSystem": {"name": "ios", "minimumVersion": {"major": 13}}
            }
        },
        "symbols": symbols,
        "relationships": relationships
    })
}

#[allow(dead_code)]
pub fn catalyst_graph(module: &str, symbols: Vec<Value>) -> Value {
    let mut graph = graph(module, symbols);
    graph["module"]["platform"]["environment"] = json!("macabi");
    graph
}

#[allow(dead_code)]
pub fn bystander_graph(module: &str, bystanders: &[&str], symbols: Vec<Value>) -> Value {
    let mut graph = graph(module, symbols);
    graph["module"]["bystanders"] = json!(bystanders);
    graph
}

pub fn file(path: &str, graph: &Value) -> SymbolGraphFile {
    SymbolGraphFile::in_memory(path, serde_json::to_vec(graph).unwrap())
}

pub fn loader(files: Vec<SymbolGraphFile>, strategy: DecodingStrategy) -> SymbolGraphLoader {
    SymbolGraphLoader::new(files, IngestConfig::default())
        .with_policy(Arc::new(FixedStrategy(strategy)))
}

/// Loads `files` and drains the iterator.
#[allow(dead_code)]
pub fn load(
    files: Vec<SymbolGraphFile>,
    strategy: DecodingStrategy,
) -> Vec<(MergedModuleGraph, bool)> {
    let mut loader = loader(files, strategy);
    loader.load_all().unwrap();
    let mut out = Vec::new();
    while let Some((graph, is_main)) = loader.next_graph() {
        out.push((graph.clone(), is_main));
    }
    out
}

#[allow(dead_code)]
pub fn encode(results: &[(MergedModuleGraph, bool)]) -> Vec<u8> {
    let graphs: Vec<&MergedModuleGraph> = results.iter().map(|(g, _)| g).collect();
    serde_json::to_vec(&graphs).unwrap()
}
