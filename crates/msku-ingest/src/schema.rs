//! Required-column checks.

use std::path::Path;

use msku_model::Table;

use crate::error::{IngestError, Result};

/// Fails with [`IngestError::MissingColumns`] listing every absent column.
pub fn require_columns(table: &Table, columns: &[&str], path: &Path) -> Result<()> {
    let missing: Vec<String> = columns
        .iter()
        .filter(|column| !table.has_column(column))
        .map(|column| (*column).to_string())
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(IngestError::MissingColumns {
        columns: missing,
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_columns() {
        let table = Table::new(vec!["SKU".to_string(), "Qty".to_string()]).unwrap();
        let path = Path::new("orders.csv");

        assert!(require_columns(&table, &["SKU"], path).is_ok());
        let err = require_columns(&table, &["SKU", "MSKU", "Date"], path).unwrap_err();
        match err {
            IngestError::MissingColumns { columns, .. } => {
                assert_eq!(columns, vec!["MSKU", "Date"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
