//! Tabular file I/O for SKU mapping runs.
//!
//! This crate reads mapping and order files into [`msku_model::Table`]s and
//! writes annotated tables back out.
//!
//! # Features
//!
//! - **Reading**: CSV and TSV (by extension), UTF-8 with optional BOM
//! - **Writing**: same formats, table column order preserved
//! - **Schema checks**: required column presence
//!
//! Spreadsheet formats are rejected with [`IngestError::UnsupportedFormat`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use msku_ingest::{read_table, require_columns, write_table};
//!
//! let path = Path::new("orders.csv");
//! let table = read_table(path)?;
//! require_columns(&table, &["SKU"], path)?;
//! write_table(Path::new("orders_mapped.csv"), &table)?;
//! ```

mod error;
mod format;
mod reader;
mod schema;
mod writer;

// === Error Types ===
pub use error::{IngestError, Result};

// === Formats ===
pub use format::TableFormat;

// === Reading ===
pub use reader::{
    MAX_TABLE_FILE_SIZE, check_file_size, check_file_size_with_limit, normalize_header,
    read_table, read_table_from_reader, unique_headers, validate_encoding,
};

// === Schema ===
pub use schema::require_columns;

// === Writing ===
pub use writer::{write_table, write_table_to_writer};
