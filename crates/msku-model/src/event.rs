//! Human-readable events handed to the presentation layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MalformedReason, RowError};
use crate::mapping::{ConflictResolution, ConflictWarning};
use crate::outcome::{ResolutionOutcome, ResolutionSummary};

/// Severity of an event for display and log routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventLevel {
    Info,
    Warning,
}

/// One entry of the run's event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MappingEvent {
    MappingConflict {
        sku: String,
        old_msku: String,
        new_msku: String,
        row: usize,
        resolution: ConflictResolution,
    },
    MalformedMappingRow {
        row: usize,
        reason: MalformedReason,
    },
    MissingSkuColumn {
        row: usize,
        column: String,
    },
    RowMapped {
        row: usize,
        sku: String,
        msku: String,
    },
    RowUnmapped {
        row: usize,
        sku: Option<String>,
    },
    RunSummary {
        total: usize,
        matched: usize,
        unmatched: usize,
    },
}

impl MappingEvent {
    #[must_use]
    pub fn level(&self) -> EventLevel {
        match self {
            Self::RowMapped { .. } | Self::RunSummary { .. } => EventLevel::Info,
            Self::MappingConflict { .. }
            | Self::MalformedMappingRow { .. }
            | Self::MissingSkuColumn { .. }
            | Self::RowUnmapped { .. } => EventLevel::Warning,
        }
    }

    /// Event name as used in the serialized form.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MappingConflict { .. } => "mapping_conflict",
            Self::MalformedMappingRow { .. } => "malformed_mapping_row",
            Self::MissingSkuColumn { .. } => "missing_sku_column",
            Self::RowMapped { .. } => "row_mapped",
            Self::RowUnmapped { .. } => "row_unmapped",
            Self::RunSummary { .. } => "run_summary",
        }
    }

    /// Builds the outcome event for one resolved row.
    pub fn from_outcome(outcome: &ResolutionOutcome) -> Self {
        match (&outcome.sku, outcome.matched) {
            (Some(sku), true) => Self::RowMapped {
                row: outcome.row,
                sku: sku.clone(),
                msku: outcome.resolved_msku.clone(),
            },
            (sku, _) => Self::RowUnmapped {
                row: outcome.row,
                sku: sku.clone(),
            },
        }
    }

    pub fn run_summary(summary: &ResolutionSummary) -> Self {
        Self::RunSummary {
            total: summary.total,
            matched: summary.matched,
            unmatched: summary.unmatched,
        }
    }
}

impl From<&ConflictWarning> for MappingEvent {
    fn from(warning: &ConflictWarning) -> Self {
        Self::MappingConflict {
            sku: warning.sku.clone(),
            old_msku: warning.old_msku.clone(),
            new_msku: warning.new_msku.clone(),
            row: warning.row,
            resolution: warning.resolution,
        }
    }
}

impl From<&RowError> for MappingEvent {
    fn from(error: &RowError) -> Self {
        match error {
            RowError::MalformedMappingRow { row, reason } => Self::MalformedMappingRow {
                row: *row,
                reason: *reason,
            },
            RowError::MissingSkuColumn { row, column } => Self::MissingSkuColumn {
                row: *row,
                column: column.clone(),
            },
        }
    }
}

impl fmt::Display for MappingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MappingConflict {
                sku,
                old_msku,
                new_msku,
                row,
                resolution,
            } => {
                let kept = match resolution {
                    ConflictResolution::Replaced => new_msku,
                    ConflictResolution::KeptExisting => old_msku,
                };
                write!(
                    f,
                    "Warning: conflicting mapping for SKU {sku} at mapping row {row}: \
                     {old_msku} vs {new_msku}, using {kept}"
                )
            }
            Self::MalformedMappingRow { row, reason } => {
                write!(f, "Warning: skipped mapping row {row}: {reason}")
            }
            Self::MissingSkuColumn { row, column } => {
                write!(f, "Warning: input row {row} has no {column} value")
            }
            Self::RowMapped { row, sku, msku } => {
                write!(f, "Row {row}: {sku} -> {msku}")
            }
            Self::RowUnmapped { row, sku } => match sku {
                Some(sku) => write!(f, "Warning: No mapping found for SKU: {sku} (row {row})"),
                None => write!(f, "Warning: No SKU on row {row}"),
            },
            Self::RunSummary {
                total,
                matched,
                unmatched,
            } => write!(
                f,
                "Mapping process completed: {total} rows, {matched} matched, {unmatched} unmatched"
            ),
        }
    }
}
