use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use patron_classify::{ColumnAssignment, DateFormat};
use patron_model::FieldType;

use crate::types::{ConvertResult, InspectResult};

pub fn print_convert_summary(result: &ConvertResult) {
    println!("Input: {}", result.input.display());
    match (&result.output, result.dry_run) {
        (_, true) => println!("Output: none (dry run)"),
        (Some(path), false) => println!("Output: {}", path.display()),
        (None, false) => println!("Output: stdout"),
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Accepted"),
        header_cell("Review"),
        header_cell("Rejected"),
        header_cell("Written"),
    ]);
    apply_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.rows_read),
        Cell::new(result.accepted).fg(Color::Green),
        count_cell(result.review.len(), Color::Yellow),
        count_cell(result.rejections.rejected_count(), Color::Red),
        Cell::new(result.records_written),
    ]);
    println!("{table}");
    print_diagnostics(&result.assignment);
    print_flagged_rows(result);
}

pub fn print_assignment(result: &InspectResult) {
    println!("Input: {}", result.input.display());
    println!("Rows: {}", result.rows_read);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Date format"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (&column, &field) in &result.assignment.columns {
        let field_cell = if field == FieldType::Unknown {
            dim_cell(field.as_str())
        } else {
            Cell::new(field.as_str()).fg(Color::Green)
        };
        let format_cell = match result.assignment.date_formats.get(&column) {
            Some(&format) => Cell::new(date_format_label(format)),
            None => dim_cell("-"),
        };
        table.add_row(vec![Cell::new(column), field_cell, format_cell]);
    }
    println!("{table}");
    print_diagnostics(&result.assignment);
}

pub fn print_fields() {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Description")]);
    apply_table_style(&mut table);
    for field in FieldType::CLASSIFIABLE {
        table.add_row(vec![
            Cell::new(field.as_str()).fg(Color::Green),
            Cell::new(describe(field)),
        ]);
    }
    println!("{table}");
}

fn print_diagnostics(assignment: &ColumnAssignment) {
    if assignment.diagnostics.is_empty() {
        return;
    }
    println!();
    println!("Diagnostics:");
    for diagnostic in &assignment.diagnostics {
        println!("- {diagnostic}");
    }
}

fn print_flagged_rows(result: &ConvertResult) {
    if result.review.is_empty() && result.rejections.rows.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Status"),
        header_cell("Reasons"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Center);
    for rejected in &result.rejections.rows {
        table.add_row(vec![
            Cell::new(rejected.row),
            Cell::new("rejected").fg(Color::Red),
            Cell::new(join_reasons(&rejected.reasons)),
        ]);
    }
    for (row, reasons) in &result.review {
        table.add_row(vec![
            Cell::new(row),
            Cell::new("review").fg(Color::Yellow),
            Cell::new(join_reasons(reasons)),
        ]);
    }
    println!();
    println!("Flagged rows:");
    println!("{table}");
}

fn join_reasons(reasons: &[patron_model::RejectionReason]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn describe(field: FieldType) -> &'static str {
    match field {
        FieldType::Barcode => "library card number, 6 to 15 digits",
        FieldType::GivenName => "first name",
        FieldType::FamilyName => "last name",
        FieldType::Date => "birth date in any supported format",
        FieldType::Gender => "single-letter gender code",
        FieldType::StreetAddress => "civic number and street",
        FieldType::Province => "province or state, code or full name",
        FieldType::Country => "country name or code",
        FieldType::PostalCode => "postal code for the active locale",
        FieldType::Phone => "phone number, 7 to 11 digits",
        FieldType::Email => "email address",
        FieldType::Unknown => "unrecognized",
    }
}

fn date_format_label(format: DateFormat) -> &'static str {
    match format {
        DateFormat::YearMonthDay => "YYYY-MM-DD",
        DateFormat::MonthDayYear => "MM/DD/YYYY",
        DateFormat::DayMonthYear => "DD/MM/YYYY",
        DateFormat::CompactYearMonthDay => "YYYYMMDD",
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}
