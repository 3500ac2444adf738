//! Applies a compiled index to input records.

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use msku_model::{
    MAPPING_NOT_FOUND, MappingIndex, MappingOptions, ResolutionOutcome, ResolutionSummary,
    RowError, Table, normalize_sku,
};

/// Output of a resolution pass.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// Input records, in input order, each carrying an MSKU cell.
    pub table: Table,
    pub outcomes: Vec<ResolutionOutcome>,
    pub summary: ResolutionSummary,
    pub errors: Vec<RowError>,
}

/// Annotates records with the MSKU of their SKU.
#[derive(Debug, Clone)]
pub struct MappingResolver {
    sku_column: String,
    msku_column: String,
}

impl Default for MappingResolver {
    fn default() -> Self {
        Self::new(&MappingOptions::default())
    }
}

impl MappingResolver {
    pub fn new(options: &MappingOptions) -> Self {
        Self {
            sku_column: options.sku_column.clone(),
            msku_column: options.msku_column.clone(),
        }
    }

    /// Looks up one raw SKU value.
    pub fn resolve(&self, row: usize, raw_sku: &str, index: &MappingIndex) -> ResolutionOutcome {
        let sku = normalize_sku(raw_sku, index.sku_case());
        match index.get(&sku) {
            Some(entry) => ResolutionOutcome {
                row,
                resolved_msku: entry.msku.clone(),
                sku: Some(sku),
                matched: true,
            },
            None => ResolutionOutcome {
                row,
                sku: Some(sku),
                matched: false,
                resolved_msku: MAPPING_NOT_FOUND.to_string(),
            },
        }
    }

    /// Resolves every record of `input` against `index`.
    ///
    /// The MSKU column is appended to the header unless already present, in
    /// which case its values are replaced. No record is dropped or reordered;
    /// a record without a SKU cell gets the sentinel and a
    /// [`RowError::MissingSkuColumn`].
    pub fn apply(&self, input: Table, index: &MappingIndex) -> Resolution {
        let mut table = input;
        if !table.ensure_column(&self.msku_column) {
            debug!(column = %self.msku_column, "replacing existing MSKU column");
        }

        let mut outcomes = Vec::with_capacity(table.len());
        let mut errors = Vec::new();
        for record in &mut table.rows {
            let outcome = match record.get(&self.sku_column) {
                Some(raw) => self.resolve(record.row, raw, index),
                None => {
                    warn!(row = record.row, column = %self.sku_column, "input row has no SKU");
                    errors.push(RowError::MissingSkuColumn {
                        row: record.row,
                        column: self.sku_column.clone(),
                    });
                    ResolutionOutcome {
                        row: record.row,
                        sku: None,
                        matched: false,
                        resolved_msku: MAPPING_NOT_FOUND.to_string(),
                    }
                }
            };
            if outcome.matched {
                trace!(row = outcome.row, msku = %outcome.resolved_msku, "row mapped");
            } else if let Some(sku) = &outcome.sku {
                info!(row = outcome.row, %sku, "no mapping found for SKU");
            }
            record.set(self.msku_column.clone(), outcome.resolved_msku.clone());
            outcomes.push(outcome);
        }

        let summary = ResolutionSummary::from_outcomes(&outcomes);
        debug!(
            total = summary.total,
            matched = summary.matched,
            unmatched = summary.unmatched,
            distinct_unmatched = summary.unmatched_skus.len(),
            "resolution complete"
        );
        Resolution {
            table,
            outcomes,
            summary,
            errors,
        }
    }
}
