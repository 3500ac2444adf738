//! Stage functions behind `msku map`.
//!
//! Each stage logs its own completion with timing; `commands` sequences them
//! inside tracing spans.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use msku_ingest::{read_table, require_columns, write_table};
use msku_map::{CompiledMapping, MappingResolver, MappingRun, MappingTable, build_events};
use msku_model::{
    ConflictWarning, MappingEvent, MappingOptions, ResolutionSummary, RowError, Table,
};

/// Suffix appended to the input stem for the default output file.
pub const OUTPUT_SUFFIX: &str = "_mapped";

/// Reads the mapping file and checks for the SKU and MSKU columns.
pub fn load_mapping(path: &Path, options: &MappingOptions) -> Result<Table> {
    let start = Instant::now();
    let table = read_table(path).with_context(|| format!("load mapping file {}", path.display()))?;
    require_columns(
        &table,
        &[options.sku_column.as_str(), options.msku_column.as_str()],
        path,
    )?;
    info!(
        path = %path.display(),
        rows = table.len(),
        duration_ms = start.elapsed().as_millis(),
        "mapping loaded"
    );
    Ok(table)
}

pub fn compile_mapping(mapping: &Table, options: &MappingOptions) -> CompiledMapping {
    let start = Instant::now();
    let compiled = MappingTable::new(options.clone()).compile_table(mapping);
    info!(
        skus = compiled.index.len(),
        mskus = compiled.index.msku_count(),
        combo_rows = compiled.combo_rows,
        conflicts = compiled.conflicts.len(),
        malformed = compiled.errors.len(),
        duration_ms = start.elapsed().as_millis(),
        "mapping compiled"
    );
    compiled
}

/// Reads the order file and checks for the SKU column.
pub fn load_input(path: &Path, options: &MappingOptions) -> Result<Table> {
    let start = Instant::now();
    let table = read_table(path).with_context(|| format!("load input file {}", path.display()))?;
    require_columns(&table, &[options.sku_column.as_str()], path)?;
    info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns.len(),
        duration_ms = start.elapsed().as_millis(),
        "input loaded"
    );
    Ok(table)
}

/// Annotates the input and assembles the run's event log.
pub fn resolve_input(
    compiled: CompiledMapping,
    input: Table,
    options: &MappingOptions,
) -> MappingRun {
    let start = Instant::now();
    let resolution = MappingResolver::new(options).apply(input, &compiled.index);
    let events = build_events(&compiled, &resolution);
    info!(
        total = resolution.summary.total,
        matched = resolution.summary.matched,
        unmatched = resolution.summary.unmatched,
        duration_ms = start.elapsed().as_millis(),
        "input resolved"
    );
    MappingRun {
        compiled,
        resolution,
        events,
    }
}

/// `<dir>/<stem>_mapped.<ext>` for an input path, keeping its extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string());
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.{extension}"))
}

pub fn write_output(path: &Path, table: &Table) -> Result<()> {
    let start = Instant::now();
    write_table(path, table)?;
    info!(
        path = %path.display(),
        rows = table.len(),
        duration_ms = start.elapsed().as_millis(),
        "output written"
    );
    Ok(())
}

/// Writes one JSON object per event, one per line.
pub fn write_events(path: &Path, events: &[MappingEvent]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for event in events {
        serde_json::to_writer(&mut writer, event)
            .with_context(|| format!("write event to {}", path.display()))?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// JSON document written by `--report`.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub mapping_file: &'a Path,
    pub input_file: &'a Path,
    pub output_file: Option<&'a Path>,
    pub options: &'a MappingOptions,
    pub indexed_skus: usize,
    pub distinct_mskus: usize,
    pub summary: &'a ResolutionSummary,
    pub conflicts: &'a [ConflictWarning],
    pub mapping_errors: &'a [RowError],
    pub input_errors: &'a [RowError],
    pub events: &'a [MappingEvent],
}

pub fn write_run_report(path: &Path, report: &RunReport<'_>) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .with_context(|| format!("write report to {}", path.display()))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
