//! Mapping table compilation.
//!
//! Turns the rows of a mapping file into a flat [`MappingIndex`]. Combo rows
//! (several SKUs in one cell) are expanded so every member resolves to the
//! row's MSKU. Conflicting definitions are resolved by the configured
//! [`ConflictPolicy`] and reported as [`ConflictWarning`]s; malformed rows are
//! skipped and reported as [`RowError`]s.

use serde::Serialize;
use tracing::{debug, warn};

use msku_model::{
    ConflictPolicy, ConflictResolution, ConflictWarning, EntrySource, IndexEntry, MalformedReason,
    MappingEntry, MappingIndex, MappingOptions, RowError, Table, split_sku_group,
};

/// Result of compiling a mapping table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompiledMapping {
    pub index: MappingIndex,
    pub conflicts: Vec<ConflictWarning>,
    pub errors: Vec<RowError>,
    /// Mapping rows that contributed to the index.
    pub rows_compiled: usize,
    /// Of those, rows with more than one SKU.
    pub combo_rows: usize,
}

impl CompiledMapping {
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.conflicts.is_empty() || !self.errors.is_empty()
    }
}

/// Compiles mapping rows into an index.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    options: MappingOptions,
}

impl MappingTable {
    pub fn new(options: MappingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MappingOptions {
        &self.options
    }

    /// Reads mapping entries from the SKU and MSKU columns of `table`.
    ///
    /// A record missing either cell yields an entry that `compile` reports as
    /// malformed.
    pub fn entries_from_table(&self, table: &Table) -> Vec<MappingEntry> {
        table
            .rows
            .iter()
            .map(|record| {
                MappingEntry::parse(
                    record.row,
                    record.get(&self.options.sku_column).unwrap_or(""),
                    record.get(&self.options.msku_column).unwrap_or(""),
                    self.options.delimiter,
                )
            })
            .collect()
    }

    /// Compiles the SKU and MSKU columns of `table`.
    pub fn compile_table(&self, table: &Table) -> CompiledMapping {
        self.compile(self.entries_from_table(table))
    }

    /// Builds the SKU index from `entries`, in order.
    ///
    /// Never fails as a whole: malformed rows are skipped and collected.
    pub fn compile<I>(&self, entries: I) -> CompiledMapping
    where
        I: IntoIterator<Item = MappingEntry>,
    {
        let case = self.options.sku_case;
        let mut compiled = CompiledMapping {
            index: MappingIndex::new(case),
            ..CompiledMapping::default()
        };

        for entry in entries {
            let members: Vec<String> = entry
                .sku_group
                .iter()
                .flat_map(|raw| split_sku_group(raw, self.options.delimiter, case))
                .collect();
            let msku = entry.msku.trim();

            let reason = if members.is_empty() {
                Some(MalformedReason::EmptySkuGroup)
            } else if msku.is_empty() {
                Some(MalformedReason::EmptyMsku)
            } else {
                None
            };
            if let Some(reason) = reason {
                warn!(row = entry.row, %reason, "skipping malformed mapping row");
                compiled.errors.push(RowError::MalformedMappingRow {
                    row: entry.row,
                    reason,
                });
                continue;
            }

            let source = if members.len() > 1 {
                compiled.combo_rows += 1;
                EntrySource::Combo
            } else {
                EntrySource::Single
            };
            compiled.rows_compiled += 1;

            for sku in members {
                self.assign(&mut compiled, sku, msku, source, entry.row);
            }
        }

        debug!(
            rows = compiled.rows_compiled,
            combo_rows = compiled.combo_rows,
            skus = compiled.index.len(),
            conflicts = compiled.conflicts.len(),
            malformed = compiled.errors.len(),
            "mapping compiled"
        );
        compiled
    }

    fn assign(
        &self,
        compiled: &mut CompiledMapping,
        sku: String,
        msku: &str,
        source: EntrySource,
        row: usize,
    ) {
        let candidate = IndexEntry {
            msku: msku.to_string(),
            source,
            row,
        };
        let Some(existing) = compiled.index.get(&sku) else {
            compiled.index.insert(sku, candidate);
            return;
        };
        let replace = replaces(self.options.conflict_policy, existing.source, source);
        if existing.msku != msku {
            let warning = ConflictWarning {
                sku: sku.clone(),
                old_msku: existing.msku.clone(),
                new_msku: msku.to_string(),
                row,
                resolution: if replace {
                    ConflictResolution::Replaced
                } else {
                    ConflictResolution::KeptExisting
                },
            };
            warn!(
                sku = %warning.sku,
                old_msku = %warning.old_msku,
                new_msku = %warning.new_msku,
                row,
                policy = %self.options.conflict_policy,
                "conflicting mapping"
            );
            compiled.conflicts.push(warning);
        }
        if replace {
            compiled.index.insert(sku, candidate);
        }
    }
}

/// Whether an incoming definition overrides an existing one for the same SKU.
fn replaces(policy: ConflictPolicy, existing: EntrySource, incoming: EntrySource) -> bool {
    match policy {
        ConflictPolicy::LastWriteWins => true,
        ConflictPolicy::SinglePrecedence => {
            !(existing == EntrySource::Single && incoming == EntrySource::Combo)
        }
    }
}
