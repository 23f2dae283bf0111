use super::metadata::Metadata;
use super::module::Module;
use super::relationship::Relationship;
use super::symbol::Symbol;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// File suffix every symbol graph artifact carries.
pub const SYMBOL_GRAPH_SUFFIX: &str = ".symbols.json";

/// A symbol graph exactly as it appears on disk.
///
/// `symbols` keeps the file's order and may contain entries that share a
/// precise identifier; collapsing them is the ingestion pipeline's job.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymbolGraph {
    pub metadata: Metadata,
    pub module: Module,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}
