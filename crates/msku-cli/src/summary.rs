use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use msku_model::{EventLevel, MAPPING_NOT_FOUND, MappingEvent, RowError};
use msku_report::{MskuTotal, SalesReport};

use crate::types::MapResult;

/// Unmatched SKUs listed before the table is cut off.
const UNMATCHED_PREVIEW: usize = 25;

pub fn print_map_summary(result: &MapResult) {
    let run = &result.run;
    let summary = &run.resolution.summary;
    println!("Mapping: {}", result.mapping_path.display());
    println!("Input: {}", result.input_path.display());
    match &result.output_path {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (not written)"),
    }
    println!(
        "Conflict policy: {} ({})",
        result.options.conflict_policy,
        result.options.conflict_policy.description()
    );

    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Indexed SKUs"), Cell::new(run.compiled.index.len())]);
    table.add_row(vec![
        Cell::new("Distinct MSKUs"),
        Cell::new(run.compiled.index.msku_count()),
    ]);
    table.add_row(vec![Cell::new("Combo rows"), Cell::new(run.compiled.combo_rows)]);
    table.add_row(vec![
        Cell::new("Conflicts"),
        count_cell(run.compiled.conflicts.len(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Malformed mapping rows"),
        count_cell(run.compiled.errors.len(), Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Input rows"), Cell::new(summary.total)]);
    table.add_row(vec![
        Cell::new("Matched"),
        Cell::new(summary.matched).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Unmatched"),
        count_cell(summary.unmatched, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Match rate")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{:.1}%", summary.match_rate() * 100.0)).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    print_issue_table(result);
    print_unmatched_table(result);
    if result.has_write_errors() {
        eprintln!("Errors:");
        for error in &result.write_errors {
            eprintln!("- {error}");
        }
    }
}

fn print_issue_table(result: &MapResult) {
    let compiled = &result.run.compiled;
    let input_errors = &result.run.resolution.errors;
    if !compiled.has_issues() && input_errors.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Row"),
        header_cell("Level"),
        header_cell("Kind"),
        header_cell("Detail"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    let mut rows: Vec<(u8, usize, MappingEvent, String)> = Vec::new();
    for warning in &compiled.conflicts {
        rows.push((0, warning.row, MappingEvent::from(warning), warning.to_string()));
    }
    for error in compiled.errors.iter().chain(input_errors) {
        let rank = match error {
            RowError::MalformedMappingRow { .. } => 0,
            RowError::MissingSkuColumn { .. } => 1,
        };
        rows.push((rank, error.row(), MappingEvent::from(error), error.to_string()));
    }
    rows.sort_by_key(|(rank, row, _, _)| (*rank, *row));
    for (rank, row, event, detail) in rows {
        let source = if rank == 0 { "mapping" } else { "input" };
        table.add_row(vec![
            Cell::new(source),
            Cell::new(row),
            level_cell(event.level()),
            Cell::new(event.name()).fg(level_color(event.level())),
            Cell::new(detail),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn print_unmatched_table(result: &MapResult) {
    let summary = &result.run.resolution.summary;
    if summary.unmatched_skus.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Unmatched SKU"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for sku in summary.unmatched_skus.iter().take(UNMATCHED_PREVIEW) {
        let rows = result
            .run
            .resolution
            .outcomes
            .iter()
            .filter(|outcome| !outcome.matched && outcome.sku.as_deref() == Some(sku.as_str()))
            .count();
        let label = if sku.is_empty() {
            dim_cell("(blank)")
        } else {
            Cell::new(sku).fg(Color::Red)
        };
        table.add_row(vec![label, Cell::new(rows)]);
    }
    let hidden = summary.unmatched_skus.len().saturating_sub(UNMATCHED_PREVIEW);
    if hidden > 0 {
        table.add_row(vec![dim_cell(format!("... {hidden} more")), dim_cell("-")]);
    }
    println!();
    println!("Rows set to {MAPPING_NOT_FOUND}:");
    println!("{table}");
}

pub fn print_sales_report(report: &SalesReport, top: usize) {
    println!(
        "Lines: {}  Total quantity: {}  Unmapped quantity: {}",
        report.lines,
        format_quantity(report.total_quantity()),
        format_quantity(report.unmapped_quantity())
    );
    print_ranking("Sales by MSKU:", &report.by_msku, top);
    match &report.returns {
        Some(returns) if !returns.is_empty() => print_ranking("Returns by MSKU:", returns, top),
        Some(_) => println!("\nNo returned lines."),
        None => {}
    }
    if let Some(trend) = &report.trend {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Month"), header_cell("Quantity")]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for month in trend {
            table.add_row(vec![
                Cell::new(&month.month),
                Cell::new(format_quantity(month.quantity)),
            ]);
        }
        println!();
        println!("Monthly trend:");
        println!("{table}");
    }
    if !report.invalid_quantity_rows.is_empty() {
        eprintln!(
            "Skipped {} line(s) with a non-numeric quantity.",
            report.invalid_quantity_rows.len()
        );
    }
    if !report.invalid_date_rows.is_empty() {
        eprintln!(
            "{} line(s) had an unreadable date and are missing from the trend.",
            report.invalid_date_rows.len()
        );
    }
}

fn print_ranking(title: &str, totals: &[MskuTotal], top: usize) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("MSKU"),
        header_cell("Quantity"),
        header_cell("Lines"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (rank, total) in totals.iter().take(top).enumerate() {
        table.add_row(vec![
            dim_cell(rank + 1),
            msku_cell(&total.msku),
            Cell::new(format_quantity(total.quantity)),
            Cell::new(total.lines),
        ]);
    }
    println!();
    println!("{title}");
    println!("{table}");
}

fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn level_cell(level: EventLevel) -> Cell {
    match level {
        EventLevel::Warning => Cell::new("WARN")
            .fg(level_color(level))
            .add_attribute(Attribute::Bold),
        EventLevel::Info => Cell::new("INFO").fg(level_color(level)),
    }
}

fn level_color(level: EventLevel) -> Color {
    match level {
        EventLevel::Warning => Color::Yellow,
        EventLevel::Info => Color::Green,
    }
}

fn msku_cell(msku: &str) -> Cell {
    if msku == MAPPING_NOT_FOUND {
        Cell::new(msku).fg(Color::Red)
    } else {
        Cell::new(msku)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
