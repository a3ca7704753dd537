use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use survey_ingest::SurveyStore;
use survey_model::Sheet;
use survey_cli::types::ExportOutcome;

pub fn print_export_summary(outcome: &ExportOutcome) {
    println!("Survey: {} ({})", outcome.survey_title, outcome.survey_id);
    println!("Output: {}", outcome.path.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Format"),
        header_cell("Responses"),
        header_cell("Columns"),
        header_cell("Bytes"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    let columns = outcome
        .sheet
        .as_ref()
        .map_or_else(|| dim_cell("-"), |sheet| Cell::new(sheet.headers.len()));
    table.add_row(vec![
        Cell::new(outcome.kind.extension().to_uppercase()),
        Cell::new(outcome.responses),
        columns,
        Cell::new(outcome.bytes),
    ]);
    println!("{table}");
}

pub fn print_survey_list(store: &SurveyStore) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Title"),
        header_cell("Active"),
        header_cell("Responses"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for survey in store.newest_first() {
        let active = if survey.is_active {
            Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(&survey.id),
            Cell::new(&survey.title),
            active,
            Cell::new(survey.response_count()),
        ]);
    }
    println!("{table}");
}

pub fn print_codebook(sheet: &Sheet) {
    if sheet.codebook.is_empty() {
        println!("No columns: the survey has no answered questions.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Header"),
        header_cell("Path"),
        header_cell("Name"),
        header_cell("Title"),
    ]);
    apply_table_style(&mut table);
    for entry in &sheet.codebook {
        let title = if entry.title.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(&entry.title)
        };
        table.add_row(vec![
            Cell::new(&entry.header),
            Cell::new(&entry.path),
            Cell::new(&entry.identifier),
            title,
        ]);
    }
    println!("{table}");
    println!("{} responses, {} columns", sheet.row_count(), sheet.headers.len());
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string())
        .fg(Color::DarkGrey)
        .add_attribute(Attribute::Dim)
}
