//! Event log assembly for the presentation layer.

use std::collections::BTreeMap;

use msku_model::{MappingEvent, RowError};

use crate::resolver::Resolution;
use crate::table::CompiledMapping;

/// Builds the ordered event log of a run.
///
/// Compilation events come first in mapping-row order, then one outcome
/// event per input row (preceded by its missing-SKU event, if any), then a
/// terminal `RunSummary`.
pub fn build_events(compiled: &CompiledMapping, resolution: &Resolution) -> Vec<MappingEvent> {
    let mut events = compile_events(compiled);

    let missing: BTreeMap<usize, &RowError> = resolution
        .errors
        .iter()
        .map(|error| (error.row(), error))
        .collect();
    events.reserve(resolution.outcomes.len() + missing.len() + 1);
    for outcome in &resolution.outcomes {
        if outcome.sku.is_none()
            && let Some(error) = missing.get(&outcome.row)
        {
            events.push(MappingEvent::from(*error));
        }
        events.push(MappingEvent::from_outcome(outcome));
    }

    events.push(MappingEvent::run_summary(&resolution.summary));
    events
}

/// Conflict and malformed-row events, ordered by mapping row.
pub fn compile_events(compiled: &CompiledMapping) -> Vec<MappingEvent> {
    let mut keyed: Vec<(usize, MappingEvent)> = compiled
        .conflicts
        .iter()
        .map(|warning| (warning.row, MappingEvent::from(warning)))
        .chain(
            compiled
                .errors
                .iter()
                .map(|error| (error.row(), MappingEvent::from(error))),
        )
        .collect();
    keyed.sort_by_key(|(row, _)| *row);
    keyed.into_iter().map(|(_, event)| event).collect()
}
