//! Human-readable run summaries.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use qrbatch_model::{BatchResult, FieldNames, FieldRole};

pub fn print_summary(result: &BatchResult) {
    println!("Output: {}", result.output_dir.display());
    println!("Archive: {}", result.archive_path.display());
    if result.skipped_rows > 0 {
        println!("Malformed input rows skipped: {}", result.skipped_rows);
    }
    println!("{}", summary_table(result));
    if result.has_errors() {
        eprintln!("Errors:");
        for error in result.errors() {
            eprintln!("- {error}");
        }
    }
}

/// One row per outcome kind plus a total.
pub fn summary_table(result: &BatchResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Outcome"), header_cell("Records")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![
        Cell::new("Generated"),
        count_cell(result.generated(), Color::Green),
    ]);
    table.add_row(vec![Cell::new("Skipped (exists)"), count_cell(result.skipped(), Color::Cyan)]);
    table.add_row(vec![Cell::new("Invalid"), count_cell(result.invalid(), Color::Yellow)]);
    table.add_row(vec![Cell::new("Errors"), count_cell(result.errors().len(), Color::Red)]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.tally.total()).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Columns read from the input file and what each one is used for.
pub fn fields_table(fields: &FieldNames) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Column", "Role", "Required", "Description"]);
    apply_table_style(&mut table);
    for role in FieldRole::ALL {
        table.add_row(vec![
            Cell::new(fields.name(role)),
            Cell::new(role_label(role)),
            Cell::new(if role.is_required() { "yes" } else { "no" }),
            Cell::new(role.description()),
        ]);
    }
    table
}

fn role_label(role: FieldRole) -> &'static str {
    match role {
        FieldRole::NationalId => "national id",
        FieldRole::HouseholdId => "household id",
        FieldRole::FullName => "full name",
        FieldRole::District => "district",
        FieldRole::SubDistrict => "sub-district",
        FieldRole::Payload => "payload",
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
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
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
