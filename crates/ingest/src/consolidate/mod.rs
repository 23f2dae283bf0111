//! Grouping and merging of deduplicated graphs.
//!
//! Consolidation is a pure pass over the complete set of decoded graphs.
//! Every precedence decision is derived from content (role, environment tag,
//! path), never from the order graphs arrived in.

mod merge;

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::Serialize;
use symgraph_api::{Metadata, Module, Relationship, Symbol};
use tracing::debug;
use xxhash_rust::xxh3::xxh3_64;

use crate::classify::GraphRole;
use crate::dedup::DedupedGraph;
use crate::error::IngestError;
use crate::types::DefaultAvailability;

/// The canonical graph for one logical module artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedModuleGraph {
    pub role: GraphRole,
    /// File that supplied the symbol set.
    pub base_path: PathBuf,
    /// Platform variants whose availability was folded in, in merge order.
    pub overlay_paths: Vec<PathBuf>,
    pub metadata: Metadata,
    pub module: Module,
    pub symbols: BTreeMap<String, Symbol>,
    pub relationships: Vec<Relationship>,
}

impl MergedModuleGraph {
    /// Grouping module: the module itself for main graphs, the extended
    /// module for extension graphs.
    pub fn module_name(&self) -> &str {
        self.role.module_name()
    }

    pub fn is_main(&self) -> bool {
        self.role.is_main()
    }

    pub fn symbol(&self, precise: &str) -> Option<&Symbol> {
        self.symbols.get(precise)
    }

    /// Hash of the canonical JSON encoding.
    pub fn fingerprint(&self) -> Result<u64, serde_json::Error> {
        Ok(xxh3_64(&serde_json::to_vec(self)?))
    }

    fn sort_key(&self) -> (&str, bool, Option<&str>, Option<&BTreeSet<String>>, &PathBuf) {
        (
            self.module_name(),
            !self.is_main(),
            self.role.extending_module(),
            self.role.bystanders(),
            &self.base_path,
        )
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConsolidationStats {
    pub overlays_applied: usize,
    pub overlay_items_added: usize,
    pub default_items_added: usize,
}

/// Partitions graphs by confirmed role, merges platform variants within each
/// partition and returns the result in a stable order.
///
/// `default_availability` is keyed by the module the symbols were authored in.
pub fn consolidate(
    graphs: Vec<DedupedGraph>,
    default_availability: &BTreeMap<String, Vec<DefaultAvailability>>,
) -> Result<(Vec<MergedModuleGraph>, ConsolidationStats), IngestError> {
    let mut seen = BTreeSet::new();
    for graph in &graphs {
        if !seen.insert(graph.path.clone()) {
            return Err(IngestError::Consolidation(format!(
                "symbol graph {} was supplied more than once",
                graph.path.display()
            )));
        }
    }

    let mut partitions: BTreeMap<GraphRole, Vec<DedupedGraph>> = BTreeMap::new();
    for graph in graphs {
        let role = graph.classified.confirm(&graph.module);
        partitions.entry(role).or_default().push(graph);
    }

    let mut stats = ConsolidationStats::default();
    let mut merged = Vec::with_capacity(partitions.len());
    for (role, members) in partitions {
        let mut graph = merge_partition(role, members, &mut stats)?;

        let authored_in = graph
            .role
            .extending_module()
            .unwrap_or(&graph.module.name)
            .to_string();
        if let Some(defaults) = default_availability.get(&authored_in) {
            stats.default_items_added +=
                merge::apply_default_availability(&graph.base_path, &mut graph.symbols, defaults)?;
        }
        merged.push(graph);
    }

    merged.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    Ok((merged, stats))
}

fn merge_partition(
    role: GraphRole,
    mut members: Vec<DedupedGraph>,
    stats: &mut ConsolidationStats,
) -> Result<MergedModuleGraph, IngestError> {
    // Untagged (default environment) graphs are authoritative; path order
    // breaks the remaining ties.
    members.sort_by(|a, b| {
        (a.module.platform.has_environment(), &a.path)
            .cmp(&(b.module.platform.has_environment(), &b.path))
    });

    let mut members = members.into_iter();
    let base = members.next().ok_or_else(|| {
        IngestError::Consolidation(format!("empty partition for {}", role.module_name()))
    })?;

    let DedupedGraph {
        path: base_path,
        metadata,
        module,
        mut symbols,
        relationships,
        ..
    } = base;

    let mut overlay_paths = Vec::new();
    for overlay in members {
        let added = merge::apply_overlay(&base_path, &mut symbols, &overlay)?;
        debug!(
            "merged {} availability items from {} into {}",
            added,
            overlay.path.display(),
            base_path.display()
        );
        stats.overlays_applied += 1;
        stats.overlay_items_added += added;
        overlay_paths.push(overlay.path);
    }

    Ok(MergedModuleGraph {
        role,
        base_path,
        overlay_paths,
        metadata,
        module,
        symbols,
        relationships,
    })
}
