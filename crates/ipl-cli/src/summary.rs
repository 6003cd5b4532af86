use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ipl_cli::commands::{AnalyzeRun, IngestRun};
use ipl_metrics::{AnalysisKind, DatasetOverview, SummaryStat, SummaryValue, Summarize};

pub fn print_ingest(run: &IngestRun) {
    println!("Source: {}", run.path.display());
    println!("Key: {}", run.key);
    let report = &run.report;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Step"), header_cell("Rows/Cells")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Rows read", report.rows_read),
        ("Missing player or season", report.missing_key_rows),
        ("Unparsed season", report.unparsed_season_rows),
        ("Duplicate (player, season)", report.duplicate_rows),
        ("\"No stats\" cells", report.no_stats_cells),
        ("Numeric coercion failures", report.coercion_failures),
        ("Batting averages clipped", report.batting_averages_clipped),
        ("Bowling averages clipped", report.bowling_averages_clipped),
    ];
    for (label, count) in rows {
        table.add_row(vec![Cell::new(label), count_cell(count)]);
    }
    table.add_row(vec![
        Cell::new("Rows kept")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.rows_kept).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if !report.absent_columns.is_empty() {
        let names: Vec<String> = report
            .absent_columns
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("Absent columns: {}", names.join(", "));
    }
    if !report.ignored_headers.is_empty() {
        println!("Ignored headers: {}", report.ignored_headers.join(", "));
    }
    print_overview(&run.overview);
    if let Some(preview) = &run.preview {
        println!("{preview}");
    }
}

pub fn print_analyze(run: &AnalyzeRun) {
    print_overview(&run.overview);
    let reports = &run.reports;
    for report in reports {
        let status = if report.result.is_ready() {
            Cell::new("ready").fg(Color::Green)
        } else {
            Cell::new("no data").fg(Color::Yellow)
        };
        let mut table = Table::new();
        table.set_header(vec![
            header_cell(report.analysis.name()),
            status.add_attribute(Attribute::Bold),
        ]);
        apply_summary_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        add_stat_rows(&mut table, &report.summary);
        println!("{table}");
    }
    let ready = reports.iter().filter(|r| r.result.is_ready()).count();
    println!("{ready}/{} analyses produced results", reports.len());
}

fn print_overview(overview: &DatasetOverview) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Dataset"), header_cell("")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    add_stat_rows(&mut table, &overview.summary());
    println!("{table}");
}

fn add_stat_rows(table: &mut Table, stats: &[SummaryStat]) {
    for stat in stats {
        table.add_row(vec![Cell::new(&stat.label), value_cell(&stat.value)]);
    }
}

pub fn print_catalog() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Analysis"),
        header_cell("Description"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, kind) in AnalysisKind::ALL.into_iter().enumerate() {
        table.add_row(vec![
            dim_cell(idx + 1),
            Cell::new(kind.name()),
            Cell::new(kind.description()),
        ]);
    }
    println!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
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

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(Color::Yellow)
    }
}

fn value_cell(value: &SummaryValue) -> Cell {
    match value {
        SummaryValue::Missing => dim_cell(value),
        _ => Cell::new(value),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
