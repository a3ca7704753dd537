use serde::Serialize;

pub const RESPONSE_ID_HEADER: &str = "Response ID";
pub const SUBMITTED_AT_HEADER: &str = "Submitted At";

/// Number of fixed columns preceding the resolved question columns.
pub const FIXED_COLUMN_COUNT: usize = 2;

pub const RESPONSES_SHEET_NAME: &str = "Survey Responses";
pub const CODEBOOK_SHEET_NAME: &str = "Codebook";
pub const CODEBOOK_HEADERS: [&str; 4] = ["Header", "Path", "Name", "Title"];

/// Explains one generated column to a human reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodebookEntry {
    pub header: String,
    pub path: String,
    pub identifier: String,
    pub title: String,
}

impl CodebookEntry {
    pub fn cells(&self) -> [&str; 4] {
        [
            self.header.as_str(),
            self.path.as_str(),
            self.identifier.as_str(),
            self.title.as_str(),
        ]
    }
}

/// One data row, aligned with [`Sheet::headers`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SheetRow {
    pub cells: Vec<String>,
}

impl SheetRow {
    pub fn get(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

/// The tabular result of one export: response rows plus the codebook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
    pub codebook: Vec<CodebookEntry>,
}

impl Sheet {
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|candidate| candidate == header)
    }

    /// Cell text for a row by header name.
    pub fn value(&self, row: usize, header: &str) -> Option<&str> {
        let column = self.column(header)?;
        self.rows.get(row)?.get(column)
    }

    /// Headers generated from response paths (everything after the fixed columns).
    pub fn dynamic_headers(&self) -> &[String] {
        self.headers.get(FIXED_COLUMN_COUNT..).unwrap_or_default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Presentation width per column: the longest of the header and its
    /// cells plus two characters of padding, capped at 50.
    pub fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(column, header)| {
                let longest_cell = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(column))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0);
                (header.chars().count().max(longest_cell) + 2).min(50)
            })
            .collect()
    }
}
