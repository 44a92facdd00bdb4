//! Raw grid to logical table conversion shared by the readers.

use std::path::Path;

use tracing::warn;

use codeset_model::LogicalTable;

use crate::error::{IngestError, Result};

pub(crate) fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Builds a table from a header row followed by data rows.
///
/// Trailing blank rows are dropped; blank rows between data rows are kept so
/// that spreadsheet row numbers stay aligned. Cells past the last header are
/// dropped, with a warning when any of them held a value.
pub(crate) fn table_from_grid(
    path: &Path,
    sheet: &str,
    mut grid: Vec<Vec<String>>,
) -> Result<LogicalTable> {
    if grid.is_empty() {
        return Ok(LogicalTable::new(Vec::new()));
    }
    let header = grid.remove(0);
    let mut columns: Vec<String> = header.iter().map(|cell| normalize_header(cell)).collect();
    while columns.last().is_some_and(String::is_empty) {
        columns.pop();
    }
    while grid.last().is_some_and(|row| is_blank_row(row)) {
        grid.pop();
    }
    let width = columns.len();
    let mut overflowing = 0usize;
    let rows = grid
        .into_iter()
        .map(|mut row| {
            if row.len() > width {
                if !is_blank_row(&row[width..]) {
                    overflowing += 1;
                }
                row.truncate(width);
            }
            row
        })
        .collect();
    if overflowing > 0 {
        warn!(
            path = %path.display(),
            sheet,
            rows = overflowing,
            columns = width,
            "dropped values right of the last header"
        );
    }
    LogicalTable::from_rows(columns, rows).map_err(|source| IngestError::Table {
        path: path.to_path_buf(),
        sheet: sheet.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|v| (*v).to_string()).collect())
            .collect()
    }

    #[test]
    fn trims_trailing_blank_rows_and_columns() {
        let table = table_from_grid(
            Path::new("x.csv"),
            "x",
            grid(&[
                &["\u{feff}CODE", " DISPLAY ", ""],
                &["A", "Alpha", ""],
                &["", "", ""],
                &["B", "Beta"],
                &["", ""],
            ]),
        )
        .unwrap();
        assert_eq!(table.columns(), ["CODE", "DISPLAY"]);
        assert_eq!(table.height(), 3);
        assert_eq!(table.value(2, "CODE"), "B");
    }

    #[test]
    fn drops_values_outside_the_header() {
        let table = table_from_grid(
            Path::new("x.csv"),
            "CS_X",
            grid(&[&["CODE", "DISPLAY"], &["F", "Female", "checked by IT"], &["M", "Male"]]),
        )
        .unwrap();
        assert_eq!(table.width(), 2);
        assert_eq!(table.height(), 2);
        assert_eq!(table.rows()[0], ["F", "Female"]);
        assert_eq!(table.value(1, "DISPLAY"), "Male");
    }
}
