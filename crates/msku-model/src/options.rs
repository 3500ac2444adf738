//! Configuration options for mapping runs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default delimiter separating SKUs inside a combo cell.
pub const DEFAULT_DELIMITER: char = ',';

/// Column holding the SKU in both the mapping and the input file.
pub const SKU_COLUMN: &str = "SKU";

/// Column holding the MSKU in the mapping file and added to the output.
pub const MSKU_COLUMN: &str = "MSKU";

/// Value written to `MSKU` when a SKU has no mapping.
pub const MAPPING_NOT_FOUND: &str = "MAPPING_NOT_FOUND";

/// How SKU values are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkuCase {
    /// Compare SKUs exactly as written (after trimming).
    #[default]
    Sensitive,
    /// Upper-case SKUs before comparison.
    Insensitive,
}

/// How a SKU defined by more than one mapping row is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// The row that appears last in the mapping file wins.
    #[default]
    LastWriteWins,
    /// Single-SKU rows win over combo rows regardless of order.
    ///
    /// Among rows of the same kind the last one wins.
    SinglePrecedence,
}

impl ConflictPolicy {
    /// Get a human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::LastWriteWins => "last-write-wins",
            Self::SinglePrecedence => "single-precedence",
        }
    }

    /// Get a description of this policy.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::LastWriteWins => "later mapping rows override earlier ones",
            Self::SinglePrecedence => "single-SKU rows override combo rows",
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Options controlling mapping compilation and resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingOptions {
    /// Delimiter splitting a combo SKU cell into members.
    pub delimiter: char,
    /// SKU comparison mode.
    pub sku_case: SkuCase,
    /// Resolution of SKUs defined by several rows.
    pub conflict_policy: ConflictPolicy,
    /// Name of the SKU column (mapping and input files).
    pub sku_column: String,
    /// Name of the MSKU column (mapping file and output).
    pub msku_column: String,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            sku_case: SkuCase::default(),
            conflict_policy: ConflictPolicy::default(),
            sku_column: SKU_COLUMN.to_string(),
            msku_column: MSKU_COLUMN.to_string(),
        }
    }
}

impl MappingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_sku_case(mut self, sku_case: SkuCase) -> Self {
        self.sku_case = sku_case;
        self
    }

    #[must_use]
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    #[must_use]
    pub fn with_sku_column(mut self, column: impl Into<String>) -> Self {
        self.sku_column = column.into();
        self
    }

    #[must_use]
    pub fn with_msku_column(mut self, column: impl Into<String>) -> Self {
        self.msku_column = column.into();
        self
    }
}
