#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

use crate::ModelError;

/// One data row of a tabular file.
///
/// A record may lack a column entirely (a short CSV row). That is distinct
/// from a present but empty cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Record {
    /// Record number within the parsed input (1-based, excluding header).
    pub row: usize,
    pub cells: BTreeMap<String, String>,
}

impl Record {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            cells: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_cell(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    pub fn has(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }
}

/// An in-memory table: ordered column names plus records.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl Table {
    /// Creates an empty table, rejecting empty or duplicate column names.
    pub fn new(columns: Vec<String>) -> Result<Self, ModelError> {
        let mut seen = BTreeSet::new();
        for (idx, column) in columns.iter().enumerate() {
            if column.trim().is_empty() {
                return Err(ModelError::EmptyColumnName { position: idx + 1 });
            }
            if !seen.insert(column.as_str()) {
                return Err(ModelError::DuplicateColumn(column.clone()));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    pub fn push_row(&mut self, row: Record) {
        self.rows.push(row);
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Appends `column` as the trailing column unless it already exists.
    ///
    /// Returns `true` when the column was added.
    pub fn ensure_column(&mut self, column: &str) -> bool {
        if self.has_column(column) {
            return false;
        }
        self.columns.push(column.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell values of one column in row order; `None` where a record lacks it.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = Option<&'a str>> {
        self.rows.iter().map(move |row| row.get(column))
    }
}
