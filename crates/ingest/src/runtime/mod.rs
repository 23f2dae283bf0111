use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::classify::classify_path;
use crate::consolidate::{MergedModuleGraph, consolidate};
use crate::dedup::{DedupedGraph, deduplicate};
use crate::error::IngestError;
use crate::strategy::{DecodingStrategy, DefaultStrategyPolicy, RuntimeProfile};
use crate::traits::StrategyPolicy;
use crate::types::{DecodeRequest, IngestConfig, SymbolGraphFile};

pub mod flow_control;
pub mod kernel;

pub use flow_control::{FlowControlConfig, FlowController};

pub type DynStrategyPolicy = Arc<dyn StrategyPolicy + Send + Sync>;

/// Summary of one completed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub strategy: DecodingStrategy,
    pub files: usize,
    pub graphs: usize,
    pub duplicates_collapsed: usize,
    pub overlays_applied: usize,
    /// Availability items copied from overlays into base symbols.
    pub overlay_items_added: usize,
    pub default_items_added: usize,
}

enum LoaderState {
    Pending,
    Loaded {
        graphs: Vec<MergedModuleGraph>,
        cursor: usize,
    },
}

/// Loads a batch of symbol graph files and hands out the consolidated
/// graphs one at a time.
///
/// Nothing is yielded until [`load_all`](Self::load_all) has completed.
pub struct SymbolGraphLoader {
    files: Vec<SymbolGraphFile>,
    config: IngestConfig,
    profile: RuntimeProfile,
    policy: DynStrategyPolicy,
    state: LoaderState,
}

impl std::fmt::Debug for SymbolGraphLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolGraphLoader")
            .field("files", &self.files)
            .field("config", &self.config)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

impl SymbolGraphLoader {
    pub fn new(files: Vec<SymbolGraphFile>, config: IngestConfig) -> Self {
        let profile = RuntimeProfile::from_config(&config);
        Self {
            files,
            config,
            profile,
            policy: Arc::new(DefaultStrategyPolicy),
            state: LoaderState::Pending,
        }
    }

    pub fn with_policy(mut self, policy: DynStrategyPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_profile(mut self, profile: RuntimeProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn profile(&self) -> &RuntimeProfile {
        &self.profile
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LoaderState::Loaded { .. })
    }

    /// Classifies, decodes, deduplicates and consolidates every file.
    ///
    /// Fails as a whole on the first error; a loader can only load once.
    pub fn load_all(&mut self) -> Result<LoadReport, IngestError> {
        if self.is_loaded() {
            return Err(IngestError::Execution(
                "symbol graphs already loaded".to_string(),
            ));
        }

        let requests = self
            .files
            .iter()
            .map(|file| {
                Ok(DecodeRequest {
                    classified: classify_path(file.path())?,
                    file: file.clone(),
                })
            })
            .collect::<Result<Vec<_>, IngestError>>()?;

        let strategy = self.policy.select(requests.len(), &self.profile);
        let flow = FlowController::new(&FlowControlConfig::from(&self.profile))?;
        debug!(
            "decoding {} symbol graphs ({}, {} workers)",
            requests.len(),
            strategy,
            flow.worker_threads()
        );

        let raw = kernel::decode(&requests, strategy, &flow)?;
        let deduped: Vec<DedupedGraph> =
            flow.install(|| raw.into_par_iter().map(deduplicate).collect());
        let duplicates_collapsed = deduped.iter().map(|g| g.collapsed).sum();

        let (graphs, stats) = consolidate(deduped, &self.config.default_availability)?;

        let report = LoadReport {
            strategy,
            files: requests.len(),
            graphs: graphs.len(),
            duplicates_collapsed,
            overlays_applied: stats.overlays_applied,
            overlay_items_added: stats.overlay_items_added,
            default_items_added: stats.default_items_added,
        };
        info!(
            "loaded {} symbol graphs into {} module graphs ({} duplicates collapsed, {} overlays adding {} availability items)",
            report.files,
            report.graphs,
            report.duplicates_collapsed,
            report.overlays_applied,
            report.overlay_items_added
        );

        self.state = LoaderState::Loaded { graphs, cursor: 0 };
        Ok(report)
    }

    /// Next graph and its main flag; `None` before loading and once exhausted.
    pub fn next_graph(&mut self) -> Option<(&MergedModuleGraph, bool)> {
        let LoaderState::Loaded { graphs, cursor } = &mut self.state else {
            return None;
        };
        let graph = graphs.get(*cursor)?;
        *cursor += 1;
        Some((graph, graph.is_main()))
    }

    /// Restarts iteration from the first graph.
    pub fn rewind(&mut self) {
        if let LoaderState::Loaded { cursor, .. } = &mut self.state {
            *cursor = 0;
        }
    }

    pub fn graphs(&self) -> &[MergedModuleGraph] {
        match &self.state {
            LoaderState::Loaded { graphs, .. } => graphs,
            LoaderState::Pending => &[],
        }
    }

    pub fn into_graphs(self) -> Vec<MergedModuleGraph> {
        match self.state {
            LoaderState::Loaded { graphs, .. } => graphs,
            LoaderState::Pending => Vec::new(),
        }
    }
}
