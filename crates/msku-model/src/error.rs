//! Error types for the mapping data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while constructing model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A table header contained an empty column name.
    #[error("column {position} has an empty name")]
    EmptyColumnName { position: usize },

    /// A table header contained the same column twice.
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
}

/// Why a mapping row was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedReason {
    /// The SKU cell held no tokens after splitting and trimming.
    EmptySkuGroup,
    /// The MSKU cell was empty after trimming.
    EmptyMsku,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySkuGroup => f.write_str("empty SKU group"),
            Self::EmptyMsku => f.write_str("empty MSKU"),
        }
    }
}

/// Row-scoped problems collected during a run.
///
/// None of these abort the batch; they are accumulated and reported at the
/// end alongside the summary.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowError {
    /// A mapping row with an empty SKU group or MSKU. The row is skipped.
    #[error("mapping row {row}: {reason}")]
    MalformedMappingRow { row: usize, reason: MalformedReason },

    /// An input row without a SKU cell. The row is treated as unmatched.
    #[error("input row {row}: missing '{column}' column")]
    MissingSkuColumn { row: usize, column: String },
}

impl RowError {
    /// Source row the problem was found on (1-based, excluding the header).
    #[must_use]
    pub fn row(&self) -> usize {
        match self {
            Self::MalformedMappingRow { row, .. } | Self::MissingSkuColumn { row, .. } => *row,
        }
    }
}
