use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use msku_cli::pipeline::{
    RunReport, compile_mapping, default_output_path, load_input, load_mapping, resolve_input,
    write_events, write_output, write_run_report,
};
use msku_ingest::read_table;
use msku_model::{ConflictPolicy, MappingOptions, SkuCase};
use msku_report::{ReportColumns, SalesReport, build_sales_report};

use crate::cli::{ConflictPolicyArg, MapArgs, ReportArgs};
use crate::types::MapResult;

pub fn run_map(args: &MapArgs) -> Result<MapResult> {
    let options = options_from_args(args);
    let run_span = info_span!(
        "map_run",
        input = %args.input.display(),
        mapping = %args.mapping.display(),
        policy = %options.conflict_policy
    );
    let _run_guard = run_span.enter();
    let run_start = Instant::now();

    // Both files are read before anything is written.
    let mapping = info_span!("load_mapping", path = %args.mapping.display())
        .in_scope(|| load_mapping(&args.mapping, &options))?;
    let compiled = info_span!("compile").in_scope(|| compile_mapping(&mapping, &options));
    let input = info_span!("load_input", path = %args.input.display())
        .in_scope(|| load_input(&args.input, &options))?;
    let run = info_span!("resolve").in_scope(|| resolve_input(compiled, input, &options));

    let mut write_errors = Vec::new();
    let output_path = if args.dry_run {
        info!("dry run, output not written");
        None
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.input));
        let span = info_span!("write_output", path = %path.display());
        match span.in_scope(|| write_output(&path, &run.resolution.table)) {
            Ok(()) => Some(path),
            Err(error) => {
                warn!(path = %path.display(), error = %error, "output write failed");
                write_errors.push(format!("{error:#}"));
                None
            }
        }
    };

    let mut result = MapResult {
        mapping_path: args.mapping.clone(),
        input_path: args.input.clone(),
        output_path,
        options,
        run,
        write_errors,
    };

    if let Some(path) = &args.events
        && let Err(error) = write_events(path, &result.run.events)
    {
        warn!(path = %path.display(), error = %error, "events write failed");
        result.write_errors.push(format!("{error:#}"));
    }
    if let Some(path) = &args.report
        && let Err(error) = write_report(path, &result)
    {
        warn!(path = %path.display(), error = %error, "report write failed");
        result.write_errors.push(format!("{error:#}"));
    }

    let summary = &result.run.resolution.summary;
    info!(
        total = summary.total,
        matched = summary.matched,
        unmatched = summary.unmatched,
        conflicts = result.run.compiled.conflicts.len(),
        duration_ms = run_start.elapsed().as_millis(),
        "mapping run complete"
    );
    Ok(result)
}

pub fn run_report(args: &ReportArgs) -> Result<SalesReport> {
    let span = info_span!("sales_report", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();
    let table = read_table(&args.input)
        .with_context(|| format!("load sales file {}", args.input.display()))?;
    let columns = ReportColumns {
        msku: args.msku_column.clone(),
        quantity: args.quantity_column.clone(),
        status: args.status_column.clone(),
        date: args.date_column.clone(),
    };
    let report = build_sales_report(&table, &columns)
        .with_context(|| format!("build report for {}", args.input.display()))?;
    if !report.invalid_quantity_rows.is_empty() {
        warn!(
            rows = report.invalid_quantity_rows.len(),
            "lines with a non-numeric quantity were skipped"
        );
    }
    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&report).context("serialize sales report")?;
        std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    }
    info!(
        lines = report.lines,
        mskus = report.by_msku.len(),
        duration_ms = start.elapsed().as_millis(),
        "sales report complete"
    );
    Ok(report)
}

fn write_report(path: &Path, result: &MapResult) -> Result<()> {
    let run = &result.run;
    let report = RunReport {
        mapping_file: &result.mapping_path,
        input_file: &result.input_path,
        output_file: result.output_path.as_deref(),
        options: &result.options,
        indexed_skus: run.compiled.index.len(),
        distinct_mskus: run.compiled.index.msku_count(),
        summary: &run.resolution.summary,
        conflicts: &run.compiled.conflicts,
        mapping_errors: &run.compiled.errors,
        input_errors: &run.resolution.errors,
        events: &run.events,
    };
    write_run_report(path, &report)
}

fn options_from_args(args: &MapArgs) -> MappingOptions {
    MappingOptions::default()
        .with_delimiter(args.delimiter)
        .with_sku_case(if args.case_insensitive {
            SkuCase::Insensitive
        } else {
            SkuCase::Sensitive
        })
        .with_conflict_policy(match args.conflict_policy {
            ConflictPolicyArg::LastWriteWins => ConflictPolicy::LastWriteWins,
            ConflictPolicyArg::SinglePrecedence => ConflictPolicy::SinglePrecedence,
        })
        .with_sku_column(args.sku_column.clone())
        .with_msku_column(args.msku_column.clone())
}
