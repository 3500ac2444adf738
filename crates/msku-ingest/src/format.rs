//! File format detection by extension.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Delimited text formats the reader and writer understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    #[default]
    Csv,
    Tsv,
}

impl TableFormat {
    /// Picks the format from the file extension.
    ///
    /// `.tsv` and `.tab` are tab separated; spreadsheet extensions are
    /// rejected; anything else is read as CSV.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "tsv" | "tab" => Ok(Self::Tsv),
            "xlsx" | "xlsm" | "xls" | "ods" => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
            _ => Ok(Self::Csv),
        }
    }

    #[must_use]
    pub const fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Tsv => "TSV",
        }
    }
}
