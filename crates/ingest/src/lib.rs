//! Symbol graph ingestion: classify, decode, deduplicate and consolidate a
//! batch of symbol graph files into one canonical graph per logical module.

pub mod classify;
pub mod consolidate;
pub mod dedup;
pub mod error;
pub mod runtime;
pub mod strategy;
pub mod traits;
pub mod types;

pub use classify::{ClassifiedFile, FileClass, GraphRole, classify, classify_path};
pub use consolidate::{ConsolidationStats, MergedModuleGraph, consolidate};
pub use dedup::{DedupedGraph, deduplicate};
pub use error::{ClassificationError, DecodeCause, IngestError};
pub use runtime::{
    DynStrategyPolicy, FlowControlConfig, FlowController, LoadReport, SymbolGraphLoader,
};
pub use strategy::{
    DecodingStrategy, DefaultStrategyPolicy, FixedStrategy, RuntimeProfile, select_strategy,
};
pub use traits::{DecodeExecutor, StrategyPolicy};
pub use types::{
    DecodeRequest, DefaultAvailability, IngestConfig, RawSymbolGraph, StrategyOverride,
    SymbolGraphFile,
};
