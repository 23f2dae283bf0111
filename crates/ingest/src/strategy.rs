use std::fmt;
use std::num::NonZeroUsize;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::traits::StrategyPolicy;
use crate::types::{IngestConfig, StrategyOverride};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DecodingStrategy {
    /// Envelope first, then symbols in fixed-size batches on the worker pool.
    PerFileBatchedSymbols,
    /// One independent decode task per file.
    WholeFileFullParallel,
}

impl fmt::Display for DecodingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodingStrategy::PerFileBatchedSymbols => f.write_str("per-file batched symbols"),
            DecodingStrategy::WholeFileFullParallel => f.write_str("whole-file full parallel"),
        }
    }
}

/// Decoding characteristics of the current process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeProfile {
    /// Whether decoding many files at once outperforms batching inside files.
    pub full_parallel_decode: bool,
    pub worker_threads: usize,
    pub symbol_batch_size: usize,
}

static DETECTED_PROFILE: Lazy<RuntimeProfile> = Lazy::new(|| {
    let threads = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    RuntimeProfile {
        full_parallel_decode: threads > 1,
        worker_threads: threads,
        symbol_batch_size: 256,
    }
});

impl RuntimeProfile {
    /// Profile derived from the host's available parallelism, computed once.
    pub fn detect() -> Self {
        DETECTED_PROFILE.clone()
    }

    /// Detected profile with the configuration's overrides applied.
    pub fn from_config(config: &IngestConfig) -> Self {
        let mut profile = Self::detect();
        if config.worker_threads > 0 {
            profile.worker_threads = config.worker_threads;
        }
        profile.symbol_batch_size = config.symbol_batch_size.max(1);
        match config.strategy {
            StrategyOverride::Auto => {}
            StrategyOverride::Batched => profile.full_parallel_decode = false,
            StrategyOverride::Parallel => profile.full_parallel_decode = true,
        }
        profile
    }
}

pub fn select_strategy(file_count: usize, profile: &RuntimeProfile) -> DecodingStrategy {
    // A single file can only be parallelized from the inside.
    if file_count > 1 && profile.full_parallel_decode {
        DecodingStrategy::WholeFileFullParallel
    } else {
        DecodingStrategy::PerFileBatchedSymbols
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultStrategyPolicy;

impl StrategyPolicy for DefaultStrategyPolicy {
    fn select(&self, file_count: usize, profile: &RuntimeProfile) -> DecodingStrategy {
        select_strategy(file_count, profile)
    }
}

/// Always answers with the same strategy.
#[derive(Debug, Clone, Copy)]
pub struct FixedStrategy(pub DecodingStrategy);

impl StrategyPolicy for FixedStrategy {
    fn select(&self, _file_count: usize, _profile: &RuntimeProfile) -> DecodingStrategy {
        self.0
    }
}
