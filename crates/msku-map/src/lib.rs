//! SKU to MSKU mapping engine.
//!
//! Two steps, used in sequence:
//!
//! 1. [`MappingTable::compile`] turns mapping rows into a [`MappingIndex`],
//!    expanding combo rows and reporting conflicts and malformed rows.
//! 2. [`MappingResolver::apply`] annotates input records with the MSKU of
//!    their SKU (or `MAPPING_NOT_FOUND`) and tallies the outcomes.
//!
//! [`map_records`] runs both and assembles the event log.
//!
//! [`MappingIndex`]: msku_model::MappingIndex

#![deny(unsafe_code)]

pub mod events;
pub mod resolver;
pub mod table;

use serde::Serialize;

use msku_model::{MappingEvent, MappingOptions, Table};

pub use events::{build_events, compile_events};
pub use resolver::{MappingResolver, Resolution};
pub use table::{CompiledMapping, MappingTable};

/// Everything a mapping run produces.
#[derive(Debug, Clone, Serialize)]
pub struct MappingRun {
    pub compiled: CompiledMapping,
    pub resolution: Resolution,
    pub events: Vec<MappingEvent>,
}

/// Compiles `mapping` and applies it to `input`.
pub fn map_records(mapping: &Table, input: Table, options: &MappingOptions) -> MappingRun {
    let compiled = MappingTable::new(options.clone()).compile_table(mapping);
    let resolution = MappingResolver::new(options).apply(input, &compiled.index);
    let events = build_events(&compiled, &resolution);
    MappingRun {
        compiled,
        resolution,
        events,
    }
}
