//! Workbook loading for the codeset tools.
//!
//! Spreadsheets are read with calamine, including the formulas of each
//! sheet's first data row. A directory of CSV files (or a single CSV file)
//! is read as one sheet per file.

use std::path::Path;

use tracing::info_span;

use codeset_model::{FormulaCells, Workbook};

pub mod csv_dir;
pub mod error;
mod rows;
pub mod spreadsheet;

pub use csv_dir::{list_csv_files, read_csv_dir, read_csv_file, read_csv_sheet};
pub use error::{IngestError, Result};
pub use spreadsheet::{cell_text, read_spreadsheet};

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// A loaded workbook with the first-data-row formulas of its sheets.
#[derive(Debug, Clone, Default)]
pub struct LoadedWorkbook {
    pub workbook: Workbook,
    pub formulas: FormulaCells,
}

/// Loads a workbook from a spreadsheet file, a CSV file or a CSV directory.
pub fn read_workbook(path: &Path) -> Result<LoadedWorkbook> {
    let span = info_span!("load", path = %path.display());
    let _guard = span.enter();

    if !path.exists() {
        return Err(IngestError::NotFound {
            path: path.to_path_buf(),
        });
    }
    if path.is_dir() {
        return read_csv_dir(path);
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if extension == "csv" {
        read_csv_file(path)
    } else if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        read_spreadsheet(path)
    } else {
        Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
        })
    }
}
