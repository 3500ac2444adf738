//! File-level read/write behaviour.

use std::fs;

use msku_ingest::{IngestError, read_table, write_table};
use tempfile::TempDir;

#[test]
fn written_file_reads_back_with_new_column() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("orders.csv");
    fs::write(&input, "OrderID,SKU,Quantity\n1001,SKU-A,2\n1002,SKU-Z,1\n").unwrap();

    let mut table = read_table(&input).unwrap();
    table.ensure_column("MSKU");
    table.rows[0].set("MSKU", "MSKU-001");
    table.rows[1].set("MSKU", "MAPPING_NOT_FOUND");

    let output = dir.path().join("out").join("orders_mapped.csv");
    write_table(&output, &table).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "OrderID,SKU,Quantity,MSKU\n1001,SKU-A,2,MSKU-001\n1002,SKU-Z,1,MAPPING_NOT_FOUND\n"
    );
}

#[test]
fn tsv_input_is_tab_separated() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("mapping.tsv");
    fs::write(&input, "SKU\tMSKU\nSKU-A,SKU-B\tMSKU-COMBO-AB\n").unwrap();

    let table = read_table(&input).unwrap();
    assert_eq!(table.rows[0].get("SKU"), Some("SKU-A,SKU-B"));
    assert_eq!(table.rows[0].get("MSKU"), Some("MSKU-COMBO-AB"));
}

#[test]
fn spreadsheet_output_is_rejected_before_writing() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("orders.xlsx");
    let table = msku_model::Table::new(vec!["SKU".to_string()]).unwrap();

    let err = write_table(&output, &table).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
    assert!(!output.exists());
}
