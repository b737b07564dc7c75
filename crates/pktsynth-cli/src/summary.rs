use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pktsynth_cli::pipeline::{FitResult, GenerateResult};
use pktsynth_ingest::NormalizeSummary;
use pktsynth_model::FittedModel;
use pktsynth_report::ComparisonSummary;

/// Frequency differences above this are highlighted.
const FREQUENCY_DELTA_WARN: f64 = 0.01;

pub fn print_generate_summary(result: &GenerateResult) {
    print_ingest_line(&result.records.summary);
    println!("Synthetic records: {}", result.synthetic.len());
    match result.seed {
        Some(seed) => println!("Seed: {seed}"),
        None => println!("Seed: random"),
    }
    println!();
    println!("{}", comparison_table(&result.summary));

    if result.dry_run {
        println!("Dry run: no files written to {}", result.output_dir.display());
        return;
    }
    println!("Output: {}", result.output_dir.display());
    for path in result.outputs.iter() {
        println!("  {}", display_name(path));
    }
}

pub fn print_fit_summary(result: &FitResult) {
    print_ingest_line(&result.records.summary);
    println!();
    println!("{}", model_table(&result.model));
}

fn print_ingest_line(summary: &NormalizeSummary) {
    println!(
        "Records: {} kept of {} read from {} file(s) ({} bad length, {} empty protocol)",
        summary.kept,
        summary.rows_read,
        summary.sources,
        summary.dropped_length,
        summary.dropped_protocol
    );
}

fn model_table(model: &FittedModel) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Protocol"),
        header_cell("Probability"),
        header_cell("Mean length"),
        header_cell("Std dev"),
        header_cell("Records"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (label, probability) in model.distribution().ranked() {
        let Some(stats) = model.length_stats(label) else {
            continue;
        };
        table.add_row(vec![
            protocol_cell(label),
            Cell::new(format!("{probability:.4}")),
            Cell::new(format!("{:.1}", stats.mean)),
            stddev_cell(stats.stddev),
            Cell::new(stats.count),
        ]);
    }
    table.add_row(vec![
        total_cell("TOTAL"),
        Cell::new(format!("{:.4}", model.distribution().total_mass())).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(model.record_count()).add_attribute(Attribute::Bold),
    ]);
    table
}

fn comparison_table(summary: &ComparisonSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Protocol"),
        header_cell("Real"),
        header_cell("Synthetic"),
        header_cell("Real freq"),
        header_cell("Synth freq"),
        header_cell("Δ freq"),
        header_cell("Real mean"),
        header_cell("Synth mean"),
        header_cell("Real sd"),
        header_cell("Synth sd"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=9 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in &summary.protocols {
        table.add_row(vec![
            protocol_cell(&row.protocol),
            Cell::new(row.real.count),
            Cell::new(row.synthetic.count),
            Cell::new(format!("{:.4}", row.real.frequency)),
            Cell::new(format!("{:.4}", row.synthetic.frequency)),
            delta_cell(row.frequency_delta()),
            Cell::new(format!("{:.1}", row.real.mean_length)),
            Cell::new(format!("{:.1}", row.synthetic.mean_length)),
            stddev_cell(row.real.stddev_length),
            stddev_cell(row.synthetic.stddev_length),
        ]);
    }
    table.add_row(vec![
        total_cell("TOTAL"),
        Cell::new(summary.real_total).add_attribute(Attribute::Bold),
        Cell::new(summary.synthetic_total).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        max_delta_cell(summary.max_frequency_delta()),
        Cell::new(format!("{:.1}", summary.real_overall.mean_length)),
        Cell::new(format!("{:.1}", summary.synthetic_overall.mean_length)),
        stddev_cell(summary.real_overall.stddev_length),
        stddev_cell(summary.synthetic_overall.stddev_length),
    ]);
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn protocol_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn total_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn delta_cell(delta: f64) -> Cell {
    highlight_delta(Cell::new(format!("{delta:+.4}")), delta)
}

// The TOTAL row carries the largest absolute difference, which has no sign.
fn max_delta_cell(max_delta: f64) -> Cell {
    highlight_delta(Cell::new(format!("max {:.4}", max_delta.abs())), max_delta)
}

fn highlight_delta(cell: Cell, delta: f64) -> Cell {
    if delta.abs() > FREQUENCY_DELTA_WARN {
        cell.fg(Color::Yellow).add_attribute(Attribute::Bold)
    } else {
        cell.fg(Color::DarkGrey)
    }
}

// A zero spread means every sampled length equals the mean.
fn stddev_cell(stddev: f64) -> Cell {
    if stddev == 0.0 {
        dim_cell("0.0")
    } else {
        Cell::new(format!("{stddev:.1}"))
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or_else(|| path.display().to_string(), str::to_string)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
