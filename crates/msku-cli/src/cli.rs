//! CLI argument definitions for the SKU mapper.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "msku",
    version,
    about = "SKU to MSKU Mapper - Annotate order lines with master SKUs",
    long_about = "Annotate order-line SKUs with canonical master SKUs (MSKUs).\n\n\
                  The mapping file needs SKU and MSKU columns; a SKU cell may list\n\
                  several SKUs (a combo) that all resolve to the row's MSKU.\n\
                  Unmapped rows get MSKU = MAPPING_NOT_FOUND."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Map the SKUs of an order file to MSKUs and write the annotated file.
    Map(MapArgs),

    /// Summarize a mapped sales file by MSKU.
    Report(ReportArgs),
}

#[derive(Parser)]
pub struct MapArgs {
    /// Order file (CSV or TSV) with a SKU column.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Mapping file (CSV or TSV) with SKU and MSKU columns.
    #[arg(short = 'm', long = "mapping", value_name = "MAPPING")]
    pub mapping: PathBuf,

    /// Output file (default: <INPUT>_mapped.<ext> next to the input).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Delimiter between SKUs in a combo cell of the mapping file.
    #[arg(long = "delimiter", value_name = "CHAR", default_value_t = msku_model::DEFAULT_DELIMITER)]
    pub delimiter: char,

    /// Compare SKUs ignoring letter case.
    #[arg(long = "case-insensitive")]
    pub case_insensitive: bool,

    /// How to resolve a SKU defined by several mapping rows.
    ///
    /// last-write-wins: the later row overrides the earlier one.
    /// single-precedence: single-SKU rows override combo rows regardless of
    /// order.
    #[arg(long = "conflict-policy", value_enum, default_value = "last-write-wins")]
    pub conflict_policy: ConflictPolicyArg,

    /// Name of the SKU column in both files.
    #[arg(long = "sku-column", value_name = "NAME", default_value = msku_model::SKU_COLUMN)]
    pub sku_column: String,

    /// Name of the MSKU column in the mapping file and the output.
    #[arg(long = "msku-column", value_name = "NAME", default_value = msku_model::MSKU_COLUMN)]
    pub msku_column: String,

    /// Resolve and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write a JSON run report (summary, conflicts, row errors, events).
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Write every event as JSON Lines.
    #[arg(long = "events", value_name = "PATH")]
    pub events: Option<PathBuf>,

    /// Exit with status 2 when any row is left unmapped.
    #[arg(long = "fail-on-unmatched")]
    pub fail_on_unmatched: bool,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Mapped sales file (CSV or TSV).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// MSKU column name.
    #[arg(long = "msku-column", value_name = "NAME", default_value = msku_model::MSKU_COLUMN)]
    pub msku_column: String,

    /// Quantity column name.
    #[arg(long = "quantity-column", value_name = "NAME", default_value = "Quantity")]
    pub quantity_column: String,

    /// Order status column name (used for returns).
    #[arg(long = "status-column", value_name = "NAME", default_value = "Status")]
    pub status_column: String,

    /// Order date column name (used for the monthly trend).
    #[arg(long = "date-column", value_name = "NAME", default_value = "Date")]
    pub date_column: String,

    /// Number of MSKUs to list in the ranking tables.
    #[arg(long = "top", value_name = "N", default_value_t = 20)]
    pub top: usize,

    /// Also write the report as JSON.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ConflictPolicyArg {
    LastWriteWins,
    SinglePrecedence,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
