//! Quantity roll-ups per MSKU, returns, and monthly trend.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use msku_model::{MAPPING_NOT_FOUND, MSKU_COLUMN, Table};

use crate::date::parse_order_date;
use crate::error::{ReportError, Result};

/// Status value (case-insensitive) marking a returned order line.
pub const RETURNED_STATUS: &str = "returned";

/// Column names the report reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportColumns {
    pub msku: String,
    pub quantity: String,
    /// Optional; returns are only computed when present.
    pub status: String,
    /// Optional; the trend is only computed when present.
    pub date: String,
}

impl Default for ReportColumns {
    fn default() -> Self {
        Self {
            msku: MSKU_COLUMN.to_string(),
            quantity: "Quantity".to_string(),
            status: "Status".to_string(),
            date: "Date".to_string(),
        }
    }
}

/// Quantity total for one MSKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MskuTotal {
    pub msku: String,
    pub quantity: f64,
    /// Order lines contributing to the total.
    pub lines: usize,
}

/// Quantity total for one calendar month (`YYYY-MM`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotal {
    pub month: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    /// Total quantity per MSKU, largest first.
    pub by_msku: Vec<MskuTotal>,
    /// Returned quantity per MSKU, largest first. `None` without a status column.
    pub returns: Option<Vec<MskuTotal>>,
    /// Quantity per month, oldest first, including empty months in between.
    /// `None` without a date column.
    pub trend: Option<Vec<MonthTotal>>,
    /// Order lines counted.
    pub lines: usize,
    /// Rows skipped because the quantity was not a number.
    pub invalid_quantity_rows: Vec<usize>,
    /// Rows left out of the trend because the date could not be parsed.
    pub invalid_date_rows: Vec<usize>,
}

impl SalesReport {
    pub fn total_quantity(&self) -> f64 {
        self.by_msku.iter().map(|total| total.quantity).sum()
    }

    /// Quantity attributed to rows whose SKU had no mapping.
    pub fn unmapped_quantity(&self) -> f64 {
        self.by_msku
            .iter()
            .find(|total| total.msku == MAPPING_NOT_FOUND)
            .map_or(0.0, |total| total.quantity)
    }
}

#[derive(Default)]
struct Accumulator {
    quantity: f64,
    lines: usize,
}

/// Builds a [`SalesReport`] from a mapped order table.
///
/// A row without an MSKU cell is counted under `MAPPING_NOT_FOUND`.
pub fn build_sales_report(table: &Table, columns: &ReportColumns) -> Result<SalesReport> {
    let missing: Vec<String> = [&columns.msku, &columns.quantity]
        .into_iter()
        .filter(|column| !table.has_column(column))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(ReportError::MissingColumns(missing));
    }
    let has_status = table.has_column(&columns.status);
    let has_date = table.has_column(&columns.date);

    let mut report = SalesReport::default();
    let mut by_msku: BTreeMap<String, Accumulator> = BTreeMap::new();
    let mut returns: BTreeMap<String, Accumulator> = BTreeMap::new();
    let mut months: BTreeMap<(i32, u32), f64> = BTreeMap::new();

    for record in &table.rows {
        let Some(quantity) = record
            .get(&columns.quantity)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
        else {
            report.invalid_quantity_rows.push(record.row);
            continue;
        };
        let msku = record
            .get(&columns.msku)
            .map(str::trim)
            .unwrap_or(MAPPING_NOT_FOUND)
            .to_string();
        report.lines += 1;

        if has_status
            && record
                .get(&columns.status)
                .is_some_and(|status| status.trim().eq_ignore_ascii_case(RETURNED_STATUS))
        {
            let entry = returns.entry(msku.clone()).or_default();
            entry.quantity += quantity;
            entry.lines += 1;
        }

        if has_date {
            match record.get(&columns.date).and_then(parse_order_date) {
                Some(date) => {
                    *months.entry((date.year(), date.month())).or_insert(0.0) += quantity;
                }
                None => report.invalid_date_rows.push(record.row),
            }
        }

        let entry = by_msku.entry(msku).or_default();
        entry.quantity += quantity;
        entry.lines += 1;
    }

    report.by_msku = ranked(by_msku);
    report.returns = has_status.then(|| ranked(returns));
    report.trend = has_date.then(|| monthly_trend(&months));
    Ok(report)
}

/// Every month from the first to the last with sales, empty months as zero.
fn monthly_trend(months: &BTreeMap<(i32, u32), f64>) -> Vec<MonthTotal> {
    let (Some(first), Some(last)) = (months.keys().next(), months.keys().next_back()) else {
        return Vec::new();
    };
    let mut trend = Vec::new();
    let (mut year, mut month) = *first;
    while (year, month) <= *last {
        trend.push(MonthTotal {
            month: format!("{year:04}-{month:02}"),
            quantity: months.get(&(year, month)).copied().unwrap_or(0.0),
        });
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    trend
}

fn ranked(totals: BTreeMap<String, Accumulator>) -> Vec<MskuTotal> {
    let mut ranked: Vec<MskuTotal> = totals
        .into_iter()
        .map(|(msku, acc)| MskuTotal {
            msku,
            quantity: acc.quantity,
            lines: acc.lines,
        })
        .collect();
    ranked.sort_by(|a, b| match b.quantity.total_cmp(&a.quantity) {
        Ordering::Equal => a.msku.cmp(&b.msku),
        other => other,
    });
    ranked
}
