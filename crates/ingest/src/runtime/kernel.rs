use std::path::Path;

use rayon::prelude::*;
use serde::Deserialize;
use serde_json::value::RawValue;
use symgraph_api::{Metadata, Module, Relationship, Symbol, SymbolGraph};
use tracing::debug;

use crate::error::IngestError;
use crate::runtime::flow_control::FlowController;
use crate::strategy::DecodingStrategy;
use crate::traits::DecodeExecutor;
use crate::types::{DecodeRequest, RawSymbolGraph};

/// Decodes every request with the given strategy on `flow`'s pool.
pub fn decode(
    requests: &[DecodeRequest],
    strategy: DecodingStrategy,
    flow: &FlowController,
) -> Result<Vec<RawSymbolGraph>, IngestError> {
    executor_for(strategy, flow.clone()).execute(requests)
}

pub fn executor_for(strategy: DecodingStrategy, flow: FlowController) -> Box<dyn DecodeExecutor> {
    match strategy {
        DecodingStrategy::PerFileBatchedSymbols => Box::new(BatchedSymbolDecoder { flow }),
        DecodingStrategy::WholeFileFullParallel => Box::new(WholeFileDecoder { flow }),
    }
}

pub struct WholeFileDecoder {
    flow: FlowController,
}

impl DecodeExecutor for WholeFileDecoder {
    fn execute(&self, requests: &[DecodeRequest]) -> Result<Vec<RawSymbolGraph>, IngestError> {
        // Each task fills its own slot; collecting into a Result stops handing
        // out work after the first failure.
        self.flow.install(|| {
            requests
                .par_iter()
                .map(decode_whole_file)
                .collect::<Result<Vec<_>, IngestError>>()
        })
    }
}

fn decode_whole_file(request: &DecodeRequest) -> Result<RawSymbolGraph, IngestError> {
    let path = request.file.path();
    let bytes = request
        .file
        .read()
        .map_err(|cause| IngestError::decode(path, cause))?;
    let graph: SymbolGraph =
        serde_json::from_slice(&bytes).map_err(|e| IngestError::decode(path, e))?;

    debug!(
        "decoded {} ({} symbols, {} relationships)",
        path.display(),
        graph.symbols.len(),
        graph.relationships.len()
    );

    Ok(RawSymbolGraph {
        path: path.to_path_buf(),
        classified: request.classified.clone(),
        graph,
    })
}

pub struct BatchedSymbolDecoder {
    flow: FlowController,
}

/// Everything but the symbol bodies, which stay as raw JSON slices until
/// they are handed out in batches.
#[derive(Deserialize)]
struct Envelope<'a> {
    metadata: Metadata,
    module: Module,
    #[serde(borrow, default)]
    symbols: Vec<&'a RawValue>,
    #[serde(default)]
    relationships: Vec<Relationship>,
}

impl DecodeExecutor for BatchedSymbolDecoder {
    fn execute(&self, requests: &[DecodeRequest]) -> Result<Vec<RawSymbolGraph>, IngestError> {
        let mut out = Vec::with_capacity(requests.len());
        for request in requests {
            out.push(self.decode_file(request)?);
        }
        Ok(out)
    }
}

impl BatchedSymbolDecoder {
    fn decode_file(&self, request: &DecodeRequest) -> Result<RawSymbolGraph, IngestError> {
        let path = request.file.path();
        let bytes = request
            .file
            .read()
            .map_err(|cause| IngestError::decode(path, cause))?;
        let envelope: Envelope<'_> =
            serde_json::from_slice(&bytes).map_err(|e| IngestError::decode(path, e))?;

        let symbols = self.decode_symbols(path, &bytes, &envelope.symbols)?;
        debug!(
            "decoded {} in batches of {} ({} symbols, {} relationships)",
            path.display(),
            self.flow.symbol_batch_size(),
            symbols.len(),
            envelope.relationships.len()
        );

        Ok(RawSymbolGraph {
            path: path.to_path_buf(),
            classified: request.classified.clone(),
            graph: SymbolGraph {
                metadata: envelope.metadata,
                module: envelope.module,
                symbols,
                relationships: envelope.relationships,
            },
        })
    }

    fn decode_symbols(
        &self,
        path: &Path,
        bytes: &[u8],
        raw: &[&RawValue],
    ) -> Result<Vec<Symbol>, IngestError> {
        let batch_size = self.flow.symbol_batch_size();
        let batches = self.flow.install(|| {
            raw.par_chunks(batch_size)
                .map(|batch| {
                    batch
                        .iter()
                        .map(|value| serde_json::from_str::<Symbol>(value.get()))
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect::<Result<Vec<_>, _>>()
        });

        let batches = match batches {
            Ok(batches) => batches,
            Err(slice_error) => {
                // Symbol errors are positioned within their own slice; a full
                // parse reports the same failure at its position in the file.
                let error = serde_json::from_slice::<SymbolGraph>(bytes)
                    .err()
                    .unwrap_or(slice_error);
                return Err(IngestError::decode(path, error));
            }
        };

        // par_chunks keeps batch order, so the file's symbol order survives.
        Ok(batches.into_iter().flatten().collect())
    }
}
