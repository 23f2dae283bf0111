use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::IngestError;
use crate::strategy::RuntimeProfile;

#[derive(Debug, Clone)]
pub struct FlowControlConfig {
    pub worker_threads: usize,
    pub symbol_batch_size: usize,
}

impl From<&RuntimeProfile> for FlowControlConfig {
    fn from(value: &RuntimeProfile) -> Self {
        Self {
            worker_threads: value.worker_threads,
            symbol_batch_size: value.symbol_batch_size,
        }
    }
}

/// Bounded worker pool shared by every stage of one load.
#[derive(Clone)]
pub struct FlowController {
    pool: Arc<ThreadPool>,
    symbol_batch_size: usize,
}

impl FlowController {
    pub fn new(config: &FlowControlConfig) -> Result<Self, IngestError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_threads.max(1))
            .thread_name(|i| format!("symgraph-decode-{i}"))
            .build()
            .map_err(|e| IngestError::Execution(format!("failed to build decode pool: {e}")))?;

        Ok(Self {
            pool: Arc::new(pool),
            symbol_batch_size: config.symbol_batch_size.max(1),
        })
    }

    /// Runs `op` inside the pool; rayon work spawned by `op` stays on it.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    pub fn worker_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn symbol_batch_size(&self) -> usize {
        self.symbol_batch_size
    }
}
