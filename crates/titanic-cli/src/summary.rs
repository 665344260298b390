use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use titanic_cli::run::RunReport;

pub fn print_summary(report: &RunReport) {
    match &report.output_dir {
        Some(dir) => println!("Output: {}", dir.display()),
        None => println!("Output: dry run, nothing written"),
    }
    if let Some(path) = &report.run_record {
        println!("Run record: {}", path.display());
    }
    println!("Steps: {}", report.steps.join(" -> "));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Partition"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("File"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for partition in &report.partitions {
        let file_cell = match &partition.path {
            Some(path) => Cell::new(path.display()),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(partition.name).add_attribute(Attribute::Bold),
            Cell::new(partition.rows),
            Cell::new(partition.columns),
            file_cell,
        ]);
    }
    println!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
