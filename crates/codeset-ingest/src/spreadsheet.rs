//! Spreadsheet workbooks (`.xlsx`, `.xlsm`, `.xls`, `.xlsb`, `.ods`) through calamine.

use std::collections::BTreeMap;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::{debug, warn};

use codeset_model::{FormulaCells, Workbook};

use crate::LoadedWorkbook;
use crate::error::{IngestError, Result};
use crate::rows::{normalize_header, table_from_grid};

/// Cell text as the editing tools show it; numbers without a trailing `.0`.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
        Data::Bool(flag) => if *flag { "TRUE" } else { "FALSE" }.to_string(),
        other => other.to_string(),
    }
}

fn spreadsheet_error(path: &Path, err: impl std::fmt::Display) -> IngestError {
    IngestError::Spreadsheet {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Reads every sheet's values and its first-data-row formulas.
pub fn read_spreadsheet(path: &Path) -> Result<LoadedWorkbook> {
    let mut reader = open_workbook_auto(path).map_err(|err| spreadsheet_error(path, err))?;
    let mut workbook = Workbook::new();
    let mut formulas: FormulaCells = BTreeMap::new();

    for name in reader.sheet_names() {
        let range = reader
            .worksheet_range(&name)
            .map_err(|err| spreadsheet_error(path, err))?;
        // Ranges start at the first used cell; pad so table positions are
        // spreadsheet columns, as formula references expect.
        let leading = range.start().map_or(0, |(_, column)| column as usize);
        let grid: Vec<Vec<String>> = range
            .rows()
            .map(|row| {
                std::iter::repeat_n(String::new(), leading)
                    .chain(row.iter().map(cell_text))
                    .collect()
            })
            .collect();
        let table = table_from_grid(path, &name, grid)?;

        match reader.worksheet_formula(&name) {
            Ok(cells) => {
                let found = first_row_formulas(&range, &cells);
                if !found.is_empty() {
                    debug!(sheet = %name, formulas = found.len(), "read first-row formulas");
                    formulas.insert(name.clone(), found);
                }
            }
            Err(err) => warn!(sheet = %name, error = %err, "formulas unavailable"),
        }

        debug!(sheet = %name, rows = table.height(), columns = table.width(), "read sheet");
        workbook.insert_sheet(name, table);
    }

    Ok(LoadedWorkbook { workbook, formulas })
}

/// Formulas of the first data row (the row below the header), keyed by header.
fn first_row_formulas(values: &Range<Data>, formulas: &Range<String>) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    let (Some((header_row, first_column)), Some((formula_row, formula_column))) =
        (values.start(), formulas.start())
    else {
        return out;
    };
    let headers: Vec<String> = values
        .rows()
        .next()
        .map(|row| row.iter().map(|cell| normalize_header(&cell_text(cell))).collect())
        .unwrap_or_default();

    for (row, column, formula) in formulas.cells() {
        let absolute_row = formula_row as usize + row;
        if absolute_row != header_row as usize + 1 || formula.trim().is_empty() {
            continue;
        }
        let absolute_column = formula_column as usize + column;
        let Some(index) = absolute_column.checked_sub(first_column as usize) else {
            continue;
        };
        match headers.get(index) {
            Some(header) if !header.is_empty() => {
                out.entry(header.clone())
                    .or_insert_with(|| formula.trim().to_string());
            }
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_text_formats_values() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("ALL".into())), "ALL");
        assert_eq!(cell_text(&Data::Int(42)), "42");
        assert_eq!(cell_text(&Data::Float(1.0)), "1");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Bool(true)), "TRUE");
    }

    #[test]
    fn missing_file_is_a_spreadsheet_error() {
        let err = read_spreadsheet(Path::new("/nonexistent/codesets.xlsx")).unwrap_err();
        assert!(matches!(err, IngestError::Spreadsheet { .. }));
    }
}
