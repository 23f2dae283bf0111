use crate::error::IngestError;
use crate::strategy::{DecodingStrategy, RuntimeProfile};
use crate::types::{DecodeRequest, RawSymbolGraph};

/// Decodes a batch of symbol graph files.
///
/// Implementations must fail the whole batch on the first error and must not
/// return partial output. The order of the returned graphs is unspecified.
pub trait DecodeExecutor: Send + Sync {
    fn execute(&self, requests: &[DecodeRequest]) -> Result<Vec<RawSymbolGraph>, IngestError>;
}

/// Picks a decoding strategy for a batch.
pub trait StrategyPolicy: Send + Sync {
    fn select(&self, file_count: usize, profile: &RuntimeProfile) -> DecodingStrategy;
}
