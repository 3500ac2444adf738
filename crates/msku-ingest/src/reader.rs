//! Delimited file reading into [`Table`]s.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use msku_model::{Record, Table};

use crate::error::{IngestError, Result};
use crate::format::TableFormat;

/// Maximum file size for loading (500 MB default).
pub const MAX_TABLE_FILE_SIZE: u64 = 500 * 1024 * 1024;

fn open_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_TABLE_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    // UTF-8 BOM is acceptable (stripped from the header)
    Ok(())
}

/// Normalizes a header value by trimming whitespace and a stray BOM.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Gives blank and repeated header names unique placeholders.
///
/// A blank header at 0-based position `i` becomes `Unnamed: i`; a repeated
/// name gets a `.1`, `.2`, ... suffix. Names already taken are skipped, so the
/// result never contains duplicates.
pub fn unique_headers(columns: Vec<String>) -> Vec<String> {
    let mut taken: BTreeSet<String> = columns
        .iter()
        .filter(|name| !name.is_empty())
        .cloned()
        .collect();
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut counters: BTreeMap<String, usize> = BTreeMap::new();
    let mut out = Vec::with_capacity(columns.len());
    for (idx, name) in columns.into_iter().enumerate() {
        if name.is_empty() {
            let mut candidate = format!("Unnamed: {idx}");
            let mut suffix = 0;
            while taken.contains(&candidate) {
                suffix += 1;
                candidate = format!("Unnamed: {idx}.{suffix}");
            }
            taken.insert(candidate.clone());
            seen.insert(candidate.clone());
            out.push(candidate);
            continue;
        }
        if seen.insert(name.clone()) {
            out.push(name);
            continue;
        }
        let counter = counters.entry(name.clone()).or_insert(0);
        let candidate = loop {
            *counter += 1;
            let candidate = format!("{name}.{counter}");
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        taken.insert(candidate.clone());
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

/// Reads a CSV or TSV file into a [`Table`].
///
/// Header names are trimmed, and blank or repeated names are replaced by
/// [`unique_headers`]. Data cells are kept verbatim. A row shorter than the
/// header simply lacks the trailing columns. Rows of blank cells are kept.
pub fn read_table(path: &Path) -> Result<Table> {
    let format = TableFormat::from_path(path)?;
    check_file_size(path)?;
    validate_encoding(path)?;
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let table = read_table_from_reader(file, format, path)?;
    tracing::debug!(
        path = %path.display(),
        format = format.label(),
        columns = table.columns.len(),
        rows = table.len(),
        "table loaded"
    );
    Ok(table)
}

/// Reads delimited text from any reader. `path` is used for error messages.
pub fn read_table_from_reader<R: Read>(reader: R, format: TableFormat, path: &Path) -> Result<Table> {
    let parse_error = |err: csv::Error| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    };

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(format.delimiter())
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(parse_error)?.clone();
    if headers.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    let columns: Vec<String> = headers.iter().map(normalize_header).collect();
    if columns.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    let renamed = unique_headers(columns.clone());
    if renamed != columns {
        tracing::warn!(
            path = %path.display(),
            columns = ?renamed,
            "blank or duplicate header names were renamed"
        );
    }
    let mut table = Table::new(renamed).map_err(|source| IngestError::InvalidHeader {
        path: path.to_path_buf(),
        source,
    })?;

    for (idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(parse_error)?;
        let row = idx + 1;
        if record.len() > table.columns.len() {
            return Err(IngestError::CsvParse {
                path: path.to_path_buf(),
                message: format!(
                    "row {row} has {} fields but the header has {}",
                    record.len(),
                    table.columns.len()
                ),
            });
        }
        let mut out = Record::new(row);
        for (column, value) in table.columns.iter().zip(record.iter()) {
            out.set(column.clone(), value);
        }
        table.rows.push(out);
    }

    Ok(table)
}
