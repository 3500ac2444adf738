use msku_map::{MappingResolver, MappingTable};
use msku_model::{
    MAPPING_NOT_FOUND, MappingEntry, MappingIndex, Record, RowError, SkuCase, Table,
};
use proptest::prelude::*;

fn index(rows: &[(&str, &str)]) -> MappingIndex {
    let entries = rows
        .iter()
        .enumerate()
        .map(|(idx, (sku, msku))| MappingEntry::parse(idx + 1, sku, msku, ','));
    MappingTable::default().compile(entries).index
}

fn orders(skus: &[Option<&str>]) -> Table {
    let mut table = Table::new(vec![
        "OrderID".to_string(),
        "SKU".to_string(),
        "Quantity".to_string(),
    ])
    .unwrap();
    for (idx, sku) in skus.iter().enumerate() {
        let mut record = Record::new(idx + 1)
            .with_cell("OrderID", format!("O-{}", idx + 1))
            .with_cell("Quantity", "1");
        if let Some(sku) = sku {
            record.set("SKU", *sku);
        }
        table.push_row(record);
    }
    table
}

#[test]
fn matched_rows_keep_original_fields() {
    let input = orders(&[Some("SKU-A"), Some(" SKU-B ")]);
    let original = input.clone();
    let resolution =
        MappingResolver::default().apply(input, &index(&[("SKU-A", "M1"), ("SKU-B", "M2")]));

    assert_eq!(resolution.table.columns, vec!["OrderID", "SKU", "Quantity", "MSKU"]);
    for (out, orig) in resolution.table.rows.iter().zip(&original.rows) {
        for column in &original.columns {
            assert_eq!(out.get(column), orig.get(column));
        }
    }
    assert_eq!(resolution.table.rows[0].get("MSKU"), Some("M1"));
    assert_eq!(resolution.table.rows[1].get("MSKU"), Some("M2"));
    assert_eq!(resolution.summary.matched, 2);
    assert!(resolution.summary.all_matched());
}

#[test]
fn unmatched_rows_get_sentinel() {
    let resolution = MappingResolver::default().apply(
        orders(&[Some("SKU-X"), Some("SKU-A"), Some("SKU-X"), Some("SKU-Y")]),
        &index(&[("SKU-A", "M1")]),
    );

    let mskus: Vec<_> = resolution.table.column_values("MSKU").collect();
    assert_eq!(
        mskus,
        vec![
            Some(MAPPING_NOT_FOUND),
            Some("M1"),
            Some(MAPPING_NOT_FOUND),
            Some(MAPPING_NOT_FOUND)
        ]
    );
    assert_eq!(resolution.summary.unmatched, 3);
    assert_eq!(resolution.summary.unmatched_skus, vec!["SKU-X", "SKU-Y"]);
    assert!(resolution.errors.is_empty());
}

#[test]
fn missing_sku_is_unmatched_and_reported() {
    let resolution = MappingResolver::default()
        .apply(orders(&[Some("SKU-A"), None]), &index(&[("SKU-A", "M1")]));

    assert_eq!(resolution.table.len(), 2);
    assert_eq!(resolution.table.rows[1].get("MSKU"), Some(MAPPING_NOT_FOUND));
    assert_eq!(
        resolution.errors,
        vec![RowError::MissingSkuColumn {
            row: 2,
            column: "SKU".to_string()
        }]
    );
    assert_eq!(resolution.summary.unmatched, 1);
    assert_eq!(resolution.summary.missing_sku_rows, vec![2]);
    assert!(resolution.summary.unmatched_skus.is_empty());
}

#[test]
fn case_insensitive_lookup() {
    let entries = vec![MappingEntry::parse(1, "sku-a", "M1", ',')];
    let options =
        msku_model::MappingOptions::new().with_sku_case(SkuCase::Insensitive);
    let compiled = MappingTable::new(options.clone()).compile(entries);
    let resolution = MappingResolver::new(&options).apply(orders(&[Some("SKU-A")]), &compiled.index);

    assert_eq!(resolution.table.rows[0].get("MSKU"), Some("M1"));
}

proptest! {
    #[test]
    fn output_preserves_length_order_and_sentinels(
        skus in prop::collection::vec(prop::option::weighted(0.9, "[A-D ]{0,4}"), 0..40)
    ) {
        let mapping = index(&[("A", "M-A"), ("B", "M-B"), ("C,D", "M-CD")]);
        let input = orders(&skus.iter().map(|s| s.as_deref()).collect::<Vec<_>>());
        let resolution = MappingResolver::default().apply(input, &mapping);

        prop_assert_eq!(resolution.table.len(), skus.len());
        prop_assert_eq!(resolution.outcomes.len(), skus.len());
        for (idx, (record, sku)) in resolution.table.rows.iter().zip(&skus).enumerate() {
            prop_assert_eq!(record.row, idx + 1);
            let msku = record.get("MSKU").unwrap();
            match sku.as_deref().and_then(|s| mapping.lookup(s)) {
                Some(expected) => prop_assert_eq!(msku, expected),
                None => prop_assert_eq!(msku, MAPPING_NOT_FOUND),
            }
        }
        prop_assert_eq!(
            resolution.summary.matched + resolution.summary.unmatched,
            skus.len()
        );
    }
}
