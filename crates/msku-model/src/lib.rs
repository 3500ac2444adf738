//! Data model for SKU to MSKU mapping.
//!
//! Shared by the ingest, mapping and CLI crates: tabular records, SKU
//! normalization, mapping entries and the compiled index, per-row outcomes,
//! and the event log presented to users.

pub mod error;
pub mod event;
pub mod mapping;
pub mod options;
pub mod outcome;
pub mod sku;
pub mod table;

pub use error::{MalformedReason, ModelError, RowError};
pub use event::{EventLevel, MappingEvent};
pub use mapping::{
    ConflictResolution, ConflictWarning, EntrySource, IndexEntry, MappingEntry, MappingIndex,
};
pub use options::{
    ConflictPolicy, DEFAULT_DELIMITER, MAPPING_NOT_FOUND, MSKU_COLUMN, MappingOptions, SKU_COLUMN,
    SkuCase,
};
pub use outcome::{ResolutionOutcome, ResolutionSummary};
pub use sku::{normalize_sku, split_sku_group};
pub use table::{Record, Table};
