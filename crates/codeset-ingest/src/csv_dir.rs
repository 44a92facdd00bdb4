//! CSV sheets: one file per sheet, named after the file stem.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use codeset_model::{LogicalTable, Workbook};

use crate::LoadedWorkbook;
use crate::error::{IngestError, Result};
use crate::rows::table_from_grid;

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Lists all CSV files in a directory, sorted by file name.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && is_csv(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Sheet name of a CSV file: its file stem.
pub fn sheet_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Reads one CSV file into a table; the first record is the header.
pub fn read_csv_sheet(path: &Path) -> Result<LogicalTable> {
    let csv_error = |source: csv::Error| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        grid.push(record.iter().map(str::to_string).collect());
    }
    table_from_grid(path, &sheet_name(path), grid)
}

/// Reads a single CSV file as a one-sheet workbook.
pub fn read_csv_file(path: &Path) -> Result<LoadedWorkbook> {
    let mut workbook = Workbook::new();
    workbook.insert_sheet(sheet_name(path), read_csv_sheet(path)?);
    Ok(LoadedWorkbook {
        workbook,
        formulas: BTreeMap::new(),
    })
}

/// Reads every CSV file of `dir` as one sheet. CSV carries no formulas.
pub fn read_csv_dir(dir: &Path) -> Result<LoadedWorkbook> {
    let mut workbook = Workbook::new();
    for path in list_csv_files(dir)? {
        let table = read_csv_sheet(&path)?;
        let name = sheet_name(&path);
        debug!(sheet = %name, rows = table.height(), columns = table.width(), "read csv sheet");
        workbook.insert_sheet(name, table);
    }
    Ok(LoadedWorkbook {
        workbook,
        formulas: BTreeMap::new(),
    })
}
