//! Error types for tabular file ingestion.

use std::path::PathBuf;

use msku_model::ModelError;
use thiserror::Error;

/// Errors that can occur while reading or writing tabular files.
///
/// All of these are fatal for a run.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file too large: {path} ({size} bytes, limit {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Format Errors ===
    /// File extension names a format that is not supported.
    #[error("unsupported file format '.{extension}': {path} (save it as CSV)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// File uses an unsupported text encoding.
    #[error("unsupported encoding {encoding} in {path} (expected UTF-8)")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// File is empty.
    #[error("file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header row is blank.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },

    /// Header row is unusable (blank or repeated column names).
    #[error("invalid header in {path}: {source}")]
    InvalidHeader {
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    // === Schema Errors ===
    /// Required columns not found.
    #[error("required column(s) {} not found in {}", .columns.join(", "), .path.display())]
    MissingColumns { columns: Vec<String>, path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
