//! Delimited file writing.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use msku_model::Table;

use crate::error::{IngestError, Result};
use crate::format::TableFormat;

/// Writes `table` as CSV or TSV (by extension), creating parent directories.
///
/// Columns are written in table order; a record lacking a column gets an
/// empty field.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let format = TableFormat::from_path(path)?;
    let write_error = |source: std::io::Error| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    let file = File::create(path).map_err(write_error)?;
    write_table_to_writer(file, format, table).map_err(|e| write_error(e.into()))?;
    tracing::debug!(
        path = %path.display(),
        format = format.label(),
        rows = table.len(),
        "table written"
    );
    Ok(())
}

/// Writes delimited text to any writer.
pub fn write_table_to_writer<W: Write>(
    writer: W,
    format: TableFormat,
    table: &Table,
) -> csv::Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_writer(writer);
    csv_writer.write_record(&table.columns)?;
    for record in &table.rows {
        csv_writer.write_record(
            table
                .columns
                .iter()
                .map(|column| record.get(column).unwrap_or("")),
        )?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use msku_model::Record;

    fn sample_table() -> Table {
        let mut table = Table::new(vec!["SKU".to_string(), "Name".to_string()]).unwrap();
        table.push_row(Record::new(1).with_cell("SKU", "A").with_cell("Name", "Widget, large"));
        table.push_row(Record::new(2).with_cell("SKU", "B"));
        table
    }

    #[test]
    fn test_write_csv_quotes_and_fills_missing() {
        let mut out = Vec::new();
        write_table_to_writer(&mut out, TableFormat::Csv, &sample_table()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "SKU,Name\nA,\"Widget, large\"\nB,\n"
        );
    }

    #[test]
    fn test_write_tsv() {
        let mut out = Vec::new();
        write_table_to_writer(&mut out, TableFormat::Tsv, &sample_table()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "SKU\tName\nA\tWidget, large\nB\t\n"
        );
    }
}
