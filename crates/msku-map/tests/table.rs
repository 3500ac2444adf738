use msku_map::MappingTable;
use msku_model::{
    ConflictPolicy, ConflictResolution, EntrySource, MalformedReason, MappingEntry,
    MappingOptions, Record, RowError, SkuCase, Table,
};

fn entry(row: usize, sku: &str, msku: &str) -> MappingEntry {
    MappingEntry::parse(row, sku, msku, ',')
}

fn mapping_table(rows: &[(&str, &str)]) -> Table {
    let mut table = Table::new(vec!["SKU".to_string(), "MSKU".to_string()]).unwrap();
    for (idx, (sku, msku)) in rows.iter().enumerate() {
        table.push_row(
            Record::new(idx + 1)
                .with_cell("SKU", *sku)
                .with_cell("MSKU", *msku),
        );
    }
    table
}

#[test]
fn combo_row_expands_to_every_member() {
    let compiled = MappingTable::default().compile(vec![entry(1, "A,B", "M")]);

    assert_eq!(compiled.index.len(), 2);
    assert_eq!(compiled.index.lookup("A"), Some("M"));
    assert_eq!(compiled.index.lookup("B"), Some("M"));
    assert_eq!(compiled.combo_rows, 1);
    assert!(compiled.conflicts.is_empty());
    assert!(!compiled.has_issues());
}

#[test]
fn last_write_wins_with_one_conflict() {
    let compiled = MappingTable::default().compile(vec![entry(1, "A", "M1"), entry(2, "A", "M2")]);

    assert_eq!(compiled.index.lookup("A"), Some("M2"));
    assert_eq!(compiled.conflicts.len(), 1);
    let conflict = &compiled.conflicts[0];
    assert_eq!(conflict.sku, "A");
    assert_eq!(conflict.old_msku, "M1");
    assert_eq!(conflict.new_msku, "M2");
    assert_eq!(conflict.row, 2);
    assert_eq!(conflict.resolution, ConflictResolution::Replaced);
}

#[test]
fn single_precedence_keeps_single_rows() {
    let options = MappingOptions::new().with_conflict_policy(ConflictPolicy::SinglePrecedence);
    let compiled = MappingTable::new(options).compile(vec![
        entry(1, "A", "M1"),
        entry(2, "A,B", "COMBO"),
        entry(3, "C,D", "COMBO-CD"),
        entry(4, "D", "M4"),
    ]);

    assert_eq!(compiled.index.lookup("A"), Some("M1"));
    assert_eq!(compiled.index.lookup("B"), Some("COMBO"));
    assert_eq!(compiled.index.lookup("C"), Some("COMBO-CD"));
    assert_eq!(compiled.index.lookup("D"), Some("M4"));
    assert_eq!(compiled.index.get("D").map(|e| e.source), Some(EntrySource::Single));

    assert_eq!(compiled.conflicts.len(), 2);
    assert_eq!(compiled.conflicts[0].sku, "A");
    assert_eq!(
        compiled.conflicts[0].resolution,
        ConflictResolution::KeptExisting
    );
    assert_eq!(compiled.conflicts[0].effective_msku(), "M1");
    assert_eq!(compiled.conflicts[1].sku, "D");
    assert_eq!(compiled.conflicts[1].resolution, ConflictResolution::Replaced);
}

#[test]
fn whitespace_is_trimmed_from_keys_and_members() {
    let compiled = MappingTable::default().compile(vec![
        entry(1, " SKU-A ", " MSKU-001 "),
        entry(2, " SKU-B ,  SKU-C", "MSKU-BC"),
    ]);

    assert_eq!(compiled.index.lookup("SKU-A"), Some("MSKU-001"));
    assert!(compiled.index.get("SKU-B").is_some());
    assert!(compiled.index.get("SKU-C").is_some());
}

#[test]
fn malformed_rows_are_skipped_and_collected() {
    let compiled = MappingTable::default().compile(vec![
        entry(1, "", "M1"),
        entry(2, "A", "   "),
        entry(3, " , ", "M3"),
        entry(4, "B", "M4"),
    ]);

    assert_eq!(compiled.index.len(), 1);
    assert_eq!(compiled.index.lookup("B"), Some("M4"));
    assert_eq!(compiled.rows_compiled, 1);
    assert_eq!(
        compiled.errors,
        vec![
            RowError::MalformedMappingRow {
                row: 1,
                reason: MalformedReason::EmptySkuGroup
            },
            RowError::MalformedMappingRow {
                row: 2,
                reason: MalformedReason::EmptyMsku
            },
            RowError::MalformedMappingRow {
                row: 3,
                reason: MalformedReason::EmptySkuGroup
            },
        ]
    );
    assert!(compiled.has_issues());
}

#[test]
fn custom_delimiter() {
    let options = MappingOptions::new().with_delimiter(';');
    let compiled = MappingTable::new(options).compile_table(&mapping_table(&[
        ("SKU-A;SKU-B", "MSKU-AB"),
        ("SKU-C,SKU-D", "MSKU-CD"),
    ]));

    assert_eq!(compiled.index.lookup("SKU-A"), Some("MSKU-AB"));
    assert_eq!(compiled.index.lookup("SKU-B"), Some("MSKU-AB"));
    assert_eq!(compiled.index.lookup("SKU-C,SKU-D"), Some("MSKU-CD"));
    assert_eq!(compiled.index.lookup("SKU-C"), None);
}

#[test]
fn case_insensitive_keys_collide() {
    let options = MappingOptions::new().with_sku_case(SkuCase::Insensitive);
    let compiled = MappingTable::new(options).compile(vec![
        entry(1, "sku-a", "M1"),
        entry(2, "SKU-A", "M2"),
    ]);

    assert_eq!(compiled.index.len(), 1);
    assert_eq!(compiled.index.lookup("Sku-A"), Some("M2"));
    assert_eq!(compiled.conflicts.len(), 1);
}

#[test]
fn entries_from_table_reads_configured_columns() {
    let options = MappingOptions::new()
        .with_sku_column("Item")
        .with_msku_column("Master");
    let mut table = Table::new(vec!["Item".to_string(), "Master".to_string()]).unwrap();
    table.push_row(Record::new(1).with_cell("Item", "A,B").with_cell("Master", "M"));
    table.push_row(Record::new(2).with_cell("Item", "C"));

    let mapping = MappingTable::new(options);
    let entries = mapping.entries_from_table(&table);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].sku_group, vec!["A", "B"]);
    assert_eq!(entries[1].msku, "");

    let compiled = mapping.compile(entries);
    assert_eq!(compiled.index.len(), 2);
    assert_eq!(
        compiled.errors,
        vec![RowError::MalformedMappingRow {
            row: 2,
            reason: MalformedReason::EmptyMsku
        }]
    );
}
