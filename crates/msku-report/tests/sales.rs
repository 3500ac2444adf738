use msku_model::{Record, Table};
use msku_report::{ReportColumns, ReportError, build_sales_report};

fn sales(rows: &[(&str, &str, &str, &str)]) -> Table {
    let mut table = Table::new(
        ["Date", "MSKU", "Quantity", "Status"]
            .iter()
            .map(|c| (*c).to_string())
            .collect(),
    )
    .unwrap();
    for (idx, (date, msku, quantity, status)) in rows.iter().enumerate() {
        table.push_row(
            Record::new(idx + 1)
                .with_cell("Date", *date)
                .with_cell("MSKU", *msku)
                .with_cell("Quantity", *quantity)
                .with_cell("Status", *status),
        );
    }
    table
}

#[test]
fn totals_returns_and_trend() {
    let table = sales(&[
        ("2024-01-05", "MSKU-001", "2", "Shipped"),
        ("2024-01-20", "MSKU-002", "5", "Shipped"),
        ("2024-02-01", "MSKU-001", "4", "Returned"),
        ("2024-02-14", "MAPPING_NOT_FOUND", "1", "returned"),
        ("not a date", "MSKU-002", "1", "Shipped"),
    ]);
    let report = build_sales_report(&table, &ReportColumns::default()).unwrap();

    let ranking: Vec<(&str, f64)> = report
        .by_msku
        .iter()
        .map(|t| (t.msku.as_str(), t.quantity))
        .collect();
    assert_eq!(
        ranking,
        vec![
            ("MSKU-001", 6.0),
            ("MSKU-002", 6.0),
            ("MAPPING_NOT_FOUND", 1.0)
        ]
    );
    assert_eq!(report.lines, 5);
    assert!((report.total_quantity() - 13.0).abs() < f64::EPSILON);
    assert!((report.unmapped_quantity() - 1.0).abs() < f64::EPSILON);

    let returns = report.returns.as_ref().unwrap();
    assert_eq!(returns.len(), 2);
    assert_eq!(returns[0].msku, "MSKU-001");
    assert_eq!(returns[0].lines, 1);

    let trend = report.trend.as_ref().unwrap();
    let months: Vec<(&str, f64)> = trend
        .iter()
        .map(|m| (m.month.as_str(), m.quantity))
        .collect();
    assert_eq!(months, vec![("2024-01", 7.0), ("2024-02", 5.0)]);
    assert_eq!(report.invalid_date_rows, vec![5]);
}

#[test]
fn trend_fills_empty_months() {
    let table = sales(&[
        ("2023-11-30", "MSKU-001", "2", "Shipped"),
        ("2024-02-01", "MSKU-001", "3", "Shipped"),
    ]);
    let report = build_sales_report(&table, &ReportColumns::default()).unwrap();

    let months: Vec<(&str, f64)> = report
        .trend
        .as_ref()
        .unwrap()
        .iter()
        .map(|m| (m.month.as_str(), m.quantity))
        .collect();
    assert_eq!(
        months,
        vec![
            ("2023-11", 2.0),
            ("2023-12", 0.0),
            ("2024-01", 0.0),
            ("2024-02", 3.0)
        ]
    );
}

#[test]
fn trend_without_valid_dates_is_empty() {
    let table = sales(&[("someday", "MSKU-001", "2", "Shipped")]);
    let report = build_sales_report(&table, &ReportColumns::default()).unwrap();

    assert_eq!(report.trend, Some(Vec::new()));
    assert_eq!(report.invalid_date_rows, vec![1]);
}

#[test]
fn invalid_quantity_rows_are_skipped() {
    let table = sales(&[
        ("2024-01-05", "MSKU-001", "two", "Shipped"),
        ("2024-01-05", "MSKU-001", " 3 ", "Shipped"),
    ]);
    let report = build_sales_report(&table, &ReportColumns::default()).unwrap();

    assert_eq!(report.invalid_quantity_rows, vec![1]);
    assert_eq!(report.by_msku.len(), 1);
    assert!((report.by_msku[0].quantity - 3.0).abs() < f64::EPSILON);
}

#[test]
fn optional_columns_are_optional() {
    let mut table = Table::new(vec!["MSKU".to_string(), "Quantity".to_string()]).unwrap();
    table.push_row(Record::new(1).with_cell("MSKU", "M").with_cell("Quantity", "1"));
    let report = build_sales_report(&table, &ReportColumns::default()).unwrap();

    assert!(report.returns.is_none());
    assert!(report.trend.is_none());
}

#[test]
fn required_columns() {
    let table = Table::new(vec!["SKU".to_string()]).unwrap();
    let err = build_sales_report(&table, &ReportColumns::default()).unwrap_err();

    assert_eq!(
        err,
        ReportError::MissingColumns(vec!["MSKU".to_string(), "Quantity".to_string()])
    );
    assert_eq!(
        err.to_string(),
        "sales data is missing required column(s): MSKU, Quantity"
    );
}

#[test]
fn report_serializes() {
    let table = sales(&[("2024-03-01", "MSKU-001", "1", "Shipped")]);
    let report = build_sales_report(&table, &ReportColumns::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["by_msku"][0]["msku"], "MSKU-001");
    assert_eq!(json["trend"][0]["month"], "2024-03");
}
