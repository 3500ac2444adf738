//! Mapping entries and the compiled SKU index.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::options::SkuCase;
use crate::sku::normalize_sku;

/// One row of the mapping source.
///
/// `sku_group` holds the raw members of the SKU cell in file order; a single
/// SKU is a group of one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Record number within the mapping file (1-based, excluding header).
    pub row: usize,
    pub sku_group: Vec<String>,
    pub msku: String,
}

impl MappingEntry {
    pub fn new(row: usize, sku_group: Vec<String>, msku: impl Into<String>) -> Self {
        Self {
            row,
            sku_group,
            msku: msku.into(),
        }
    }

    /// Builds an entry from the raw SKU cell, splitting it on `delimiter`.
    pub fn parse(row: usize, raw_sku: &str, msku: &str, delimiter: char) -> Self {
        let sku_group = raw_sku.split(delimiter).map(str::to_string).collect();
        Self::new(row, sku_group, msku)
    }
}

/// Whether an index entry came from a single-SKU row or a combo row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    Single,
    Combo,
}

/// The effective assignment for one SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub msku: String,
    pub source: EntrySource,
    /// Mapping row that produced this assignment.
    pub row: usize,
}

/// Normalized SKU to MSKU lookup.
///
/// Built once per run by the mapping compiler. Lookups apply the same
/// normalization that was used for the keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingIndex {
    entries: BTreeMap<String, IndexEntry>,
    sku_case: SkuCase,
}

impl MappingIndex {
    pub fn new(sku_case: SkuCase) -> Self {
        Self {
            entries: BTreeMap::new(),
            sku_case,
        }
    }

    pub fn sku_case(&self) -> SkuCase {
        self.sku_case
    }

    /// Normalizes `raw_sku` and returns its MSKU, if mapped.
    pub fn lookup(&self, raw_sku: &str) -> Option<&str> {
        let key = normalize_sku(raw_sku, self.sku_case);
        self.entries.get(&key).map(|entry| entry.msku.as_str())
    }

    /// Returns the entry for an already normalized SKU.
    pub fn get(&self, sku: &str) -> Option<&IndexEntry> {
        self.entries.get(sku)
    }

    /// Stores `entry` under an already normalized SKU, returning the previous one.
    pub fn insert(&mut self, sku: String, entry: IndexEntry) -> Option<IndexEntry> {
        self.entries.insert(sku, entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexEntry)> {
        self.entries.iter().map(|(sku, entry)| (sku.as_str(), entry))
    }

    /// Number of distinct MSKUs the index resolves to.
    pub fn msku_count(&self) -> usize {
        self.entries
            .values()
            .map(|entry| entry.msku.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Which value survived a conflicting definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictResolution {
    /// The new definition replaced the existing one.
    Replaced,
    /// The existing definition was kept.
    KeptExisting,
}

/// A SKU assigned two different MSKUs by the mapping file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictWarning {
    pub sku: String,
    pub old_msku: String,
    pub new_msku: String,
    /// Mapping row carrying the new definition.
    pub row: usize,
    pub resolution: ConflictResolution,
}

impl ConflictWarning {
    /// The MSKU the index ends up holding for this SKU.
    #[must_use]
    pub fn effective_msku(&self) -> &str {
        match self.resolution {
            ConflictResolution::Replaced => &self.new_msku,
            ConflictResolution::KeptExisting => &self.old_msku,
        }
    }
}

impl fmt::Display for ConflictWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SKU '{}' mapped to '{}' and '{}' (row {}), using '{}'",
            self.sku,
            self.old_msku,
            self.new_msku,
            self.row,
            self.effective_msku()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(msku: &str) -> IndexEntry {
        IndexEntry {
            msku: msku.to_string(),
            source: EntrySource::Single,
            row: 1,
        }
    }

    #[test]
    fn parse_keeps_raw_members() {
        let parsed = MappingEntry::parse(2, " A , B", "M", ',');
        assert_eq!(parsed.sku_group, vec![" A ", " B"]);
        assert_eq!(parsed.row, 2);
    }

    #[test]
    fn lookup_normalizes_input() {
        let mut index = MappingIndex::new(SkuCase::Sensitive);
        index.insert("SKU-A".to_string(), entry("M1"));
        assert_eq!(index.lookup("  SKU-A "), Some("M1"));
        assert_eq!(index.lookup("sku-a"), None);
    }

    #[test]
    fn lookup_case_insensitive() {
        let mut index = MappingIndex::new(SkuCase::Insensitive);
        index.insert("SKU-A".to_string(), entry("M1"));
        assert_eq!(index.lookup("sku-a"), Some("M1"));
    }

    #[test]
    fn msku_count_is_distinct() {
        let mut index = MappingIndex::new(SkuCase::Sensitive);
        index.insert("A".to_string(), entry("M1"));
        index.insert("B".to_string(), entry("M1"));
        index.insert("C".to_string(), entry("M2"));
        assert_eq!(index.len(), 3);
        assert_eq!(index.msku_count(), 2);
    }

    #[test]
    fn conflict_display_names_effective_value() {
        let warning = ConflictWarning {
            sku: "A".to_string(),
            old_msku: "M1".to_string(),
            new_msku: "M2".to_string(),
            row: 4,
            resolution: ConflictResolution::KeptExisting,
        };
        assert_eq!(
            warning.to_string(),
            "SKU 'A' mapped to 'M1' and 'M2' (row 4), using 'M1'"
        );
    }
}
