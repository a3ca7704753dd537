//! Two-sheet XLSX workbook.
//!
//! The "Survey Responses" sheet holds the assembled table with a bold,
//! frozen header row and an auto-filter over the used range. The
//! "Codebook" sheet explains each generated column.

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};
use tracing::debug;

use survey_model::{CODEBOOK_HEADERS, CODEBOOK_SHEET_NAME, RESPONSES_SHEET_NAME, Sheet};
use survey_transform::serialize::clip_cell_text;

use crate::error::{ExportError, Result};

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
}

/// Build the workbook for a sheet and return its bytes.
///
/// Nothing is returned unless every cell was written.
pub fn write_workbook(sheet: &Sheet) -> Result<Vec<u8>> {
    let header_format = header_format();
    let mut workbook = Workbook::new();

    let responses = workbook.add_worksheet();
    responses.set_name(RESPONSES_SHEET_NAME)?;
    let rows = sheet.rows.iter().map(|row| row.cells.as_slice());
    write_table(responses, &sheet.headers, rows, &header_format)?;
    let last_column = column_index(sheet.headers.len().saturating_sub(1))?;
    for (column, width) in sheet.column_widths().into_iter().enumerate() {
        let width = u8::try_from(width).unwrap_or(u8::MAX);
        responses.set_column_width(column_index(column)?, width)?;
    }
    responses.set_freeze_panes(1, 0)?;
    responses.autofilter(0, 0, row_index(sheet.row_count())?, last_column)?;

    let codebook = workbook.add_worksheet();
    codebook.set_name(CODEBOOK_SHEET_NAME)?;
    let entries: Vec<[String; 4]> = sheet
        .codebook
        .iter()
        .map(|entry| entry.cells().map(str::to_string))
        .collect();
    let codebook_headers = CODEBOOK_HEADERS.map(str::to_string);
    write_table(
        codebook,
        &codebook_headers,
        entries.iter().map(|cells| cells.as_slice()),
        &header_format,
    )?;
    codebook.autofilter(0, 0, row_index(entries.len())?, column_index(CODEBOOK_HEADERS.len() - 1)?)?;

    let bytes = workbook.save_to_buffer()?;
    debug!(
        columns = sheet.headers.len(),
        rows = sheet.row_count(),
        codebook_entries = sheet.codebook.len(),
        bytes = bytes.len(),
        "workbook built"
    );
    Ok(bytes)
}

/// Write a header row and data rows; empty cells are left blank.
fn write_table<'a>(
    worksheet: &mut Worksheet,
    headers: &[String],
    rows: impl Iterator<Item = &'a [String]>,
    header_format: &Format,
) -> Result<()> {
    for (column, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(
            0,
            column_index(column)?,
            clip_cell_text(header.clone()),
            header_format,
        )?;
    }
    for (position, cells) in rows.enumerate() {
        let row = row_index(position + 1)?;
        for (column, cell) in cells.iter().enumerate() {
            if !cell.is_empty() {
                worksheet.write_string(row, column_index(column)?, clip_cell_text(cell.clone()))?;
            }
        }
    }
    Ok(())
}

fn column_index(column: usize) -> Result<u16> {
    u16::try_from(column).map_err(|_| ExportError::SheetTooLarge {
        what: "column",
        count: column,
    })
}

fn row_index(row: usize) -> Result<u32> {
    u32::try_from(row).map_err(|_| ExportError::SheetTooLarge {
        what: "row",
        count: row,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_model::{CodebookEntry, SheetRow};

    fn sheet() -> Sheet {
        Sheet {
            headers: vec![
                "Response ID".to_string(),
                "Submitted At".to_string(),
                "q1 - Name".to_string(),
            ],
            rows: vec![SheetRow {
                cells: vec!["r1".to_string(), String::new(), "Ann".to_string()],
            }],
            codebook: vec![CodebookEntry {
                header: "q1 - Name".to_string(),
                path: "q1".to_string(),
                identifier: "q1".to_string(),
                title: "Name".to_string(),
            }],
        }
    }

    #[test]
    fn produces_a_zip_container() {
        let bytes = write_workbook(&sheet()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn empty_sheets_still_build() {
        let bytes = write_workbook(&Sheet::default()).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn oversized_indices_are_reported() {
        assert!(matches!(
            column_index(usize::from(u16::MAX) + 1),
            Err(ExportError::SheetTooLarge { what: "column", .. })
        ));
    }
}
