//! Collapses symbols that share a precise identifier.
//!
//! Compilers emit both the completion-handler and the `async` form of some
//! declarations under one identifier. The non-async entry wins. Among entries
//! that tie on that rule the one with the smallest JSON encoding is kept, so
//! the outcome never depends on the order the entries appeared in.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::PathBuf;

use symgraph_api::{Metadata, Module, Relationship, Symbol};
use tracing::debug;

use crate::classify::ClassifiedFile;
use crate::types::RawSymbolGraph;

/// A decoded graph whose symbols are unique by precise identifier.
#[derive(Debug, Clone)]
pub struct DedupedGraph {
    pub path: PathBuf,
    pub classified: ClassifiedFile,
    pub metadata: Metadata,
    pub module: Module,
    pub symbols: BTreeMap<String, Symbol>,
    pub relationships: Vec<Relationship>,
    /// Number of entries dropped in favor of another with the same identifier.
    pub collapsed: usize,
}

pub fn deduplicate(raw: RawSymbolGraph) -> DedupedGraph {
    let RawSymbolGraph {
        path,
        classified,
        graph,
    } = raw;

    let mut symbols: BTreeMap<String, Symbol> = BTreeMap::new();
    let mut collapsed = 0;
    for symbol in graph.symbols {
        match symbols.entry(symbol.identifier.precise.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(symbol);
            }
            Entry::Occupied(mut slot) => {
                collapsed += 1;
                if prefers(&symbol, slot.get()) {
                    slot.insert(symbol);
                }
            }
        }
    }

    if collapsed > 0 {
        debug!(
            "collapsed {} duplicate symbol entries in {}",
            collapsed,
            path.display()
        );
    }

    DedupedGraph {
        path,
        classified,
        metadata: graph.metadata,
        module: graph.module,
        symbols,
        relationships: graph.relationships,
        collapsed,
    }
}

/// Whether `candidate` should replace `current`.
fn prefers(candidate: &Symbol, current: &Symbol) -> bool {
    match (
        candidate.is_async_declaration(),
        current.is_async_declaration(),
    ) {
        (false, true) => true,
        (true, false) => false,
        _ => canonical_encoding(candidate) < canonical_encoding(current),
    }
}

fn canonical_encoding(symbol: &Symbol) -> String {
    // Mixins live in a BTreeMap, so the encoding is stable.
    serde_json::to_string(symbol).unwrap_or_default()
}
