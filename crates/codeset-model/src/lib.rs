//! Data model shared by the codeset workbook tooling.
//!
//! A workbook is an ordered set of sheets, each sheet a [`LogicalTable`] of
//! string cells. Column roles, resolved sheet mappings and diff records are
//! plain typed values so that every core operation can stay a pure function
//! over borrowed tables.

pub mod diff;
pub mod error;
pub mod mapping;
pub mod roles;
pub mod table;

pub use diff::{ChangedRow, DiffRow, DiffSummary, SheetDiff, WorkbookDiff};
pub use error::{CodesetError, Result};
pub use mapping::{FormulaCells, LookupTables, SheetMapping, combine_standard};
pub use roles::{ColumnRoles, MappedColumn, MappedKind, normalize_header};
pub use table::{LogicalTable, Workbook, pick_canonical};

/// Offset between a zero-based data row index and its spreadsheet row number
/// (one header row, one-based rows).
pub const SPREADSHEET_ROW_OFFSET: usize = 2;

/// Spreadsheet row number for a zero-based data row index.
#[must_use]
pub fn spreadsheet_row(index: usize) -> usize {
    index + SPREADSHEET_ROW_OFFSET
}
