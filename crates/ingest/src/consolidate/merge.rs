use std::collections::BTreeMap;
use std::path::Path;

use symgraph_api::{Availability, AvailabilityItem, Symbol};
use tracing::debug;

use crate::dedup::DedupedGraph;
use crate::error::IngestError;
use crate::types::DefaultAvailability;

/// Adds the overlay's availability domains that the base symbols lack.
///
/// Returns the number of availability items added. Overlay symbols without a
/// base counterpart are dropped; an overlay sharing no symbol at all with a
/// non-empty base is rejected.
pub(crate) fn apply_overlay(
    base_path: &Path,
    base: &mut BTreeMap<String, Symbol>,
    overlay: &DedupedGraph,
) -> Result<usize, IngestError> {
    let mut matched = 0usize;
    let mut unmatched = 0usize;
    let mut added = 0usize;

    for (id, overlay_symbol) in &overlay.symbols {
        let Some(base_symbol) = base.get_mut(id) else {
            unmatched += 1;
            continue;
        };
        matched += 1;

        let Some(overlay_availability) = read_availability(&overlay.path, overlay_symbol)? else {
            continue;
        };
        let mut availability = read_availability(base_path, base_symbol)?.unwrap_or_default();
        let count = availability.extend_missing_domains(&overlay_availability);
        if count > 0 {
            write_availability(base_path, base_symbol, &availability)?;
            added += count;
        }
    }

    if matched == 0 && !overlay.symbols.is_empty() && !base.is_empty() {
        return Err(IngestError::Consolidation(format!(
            "overlay {} shares no symbols with {}",
            overlay.path.display(),
            base_path.display()
        )));
    }
    if unmatched > 0 {
        debug!(
            "ignored {} symbols of {} missing from {}",
            unmatched,
            overlay.path.display(),
            base_path.display()
        );
    }

    Ok(added)
}

/// Gives every symbol the configured fallback domains it does not carry yet.
pub(crate) fn apply_default_availability(
    base_path: &Path,
    symbols: &mut BTreeMap<String, Symbol>,
    defaults: &[DefaultAvailability],
) -> Result<usize, IngestError> {
    if defaults.is_empty() {
        return Ok(0);
    }

    let fallback = Availability(
        defaults
            .iter()
            .map(|d| AvailabilityItem::introduced(d.domain.clone(), d.introduced.clone()))
            .collect(),
    );

    let mut added = 0usize;
    for symbol in symbols.values_mut() {
        let mut availability = read_availability(base_path, symbol)?.unwrap_or_default();
        let count = availability.extend_missing_domains(&fallback);
        if count > 0 {
            write_availability(base_path, symbol, &availability)?;
            added += count;
        }
    }
    Ok(added)
}

fn read_availability(path: &Path, symbol: &Symbol) -> Result<Option<Availability>, IngestError> {
    symbol.availability().transpose().map_err(|e| {
        IngestError::Consolidation(format!(
            "unreadable availability for {} in {}: {e}",
            symbol.precise_identifier(),
            path.display()
        ))
    })
}

fn write_availability(
    path: &Path,
    symbol: &mut Symbol,
    availability: &Availability,
) -> Result<(), IngestError> {
    symbol.set_mixin(availability).map_err(|e| {
        IngestError::Consolidation(format!(
            "failed to store availability for {} in {}: {e}",
            symbol.precise_identifier(),
            path.display()
        ))
    })
}
