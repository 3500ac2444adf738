//! Per-row resolution outcomes and the run-level summary.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Result of resolving one input record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    /// Record number within the input file (1-based, excluding header).
    pub row: usize,
    /// Normalized SKU, or `None` when the record had no SKU cell.
    pub sku: Option<String>,
    pub matched: bool,
    /// The mapped MSKU, or the not-found sentinel.
    pub resolved_msku: String,
}

/// Tallies over all outcomes of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionSummary {
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
    /// Distinct unmatched SKUs in first-seen order.
    pub unmatched_skus: Vec<String>,
    /// Rows that had no SKU cell at all.
    pub missing_sku_rows: Vec<usize>,
}

impl ResolutionSummary {
    pub fn from_outcomes(outcomes: &[ResolutionOutcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };
        let mut seen = BTreeSet::new();
        for outcome in outcomes {
            if outcome.matched {
                summary.matched += 1;
                continue;
            }
            summary.unmatched += 1;
            match &outcome.sku {
                Some(sku) => {
                    if seen.insert(sku.as_str()) {
                        summary.unmatched_skus.push(sku.clone());
                    }
                }
                None => summary.missing_sku_rows.push(outcome.row),
            }
        }
        summary
    }

    /// Share of rows that matched, in `0.0..=1.0`. An empty run counts as 1.0.
    #[must_use]
    pub fn match_rate(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }

    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.unmatched == 0
    }
}
