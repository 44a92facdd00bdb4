//! Row-level difference records between two workbook snapshots.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A normalized row keyed for correlation between snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRow {
    /// Unique key within its snapshot (`#n` suffix on repeats).
    pub key: String,
    /// Key shown to users: the natural identity value, or `Row <n>`.
    pub display_key: String,
    /// Spreadsheet row number (data index + 2).
    pub row_number: usize,
    /// Stripped values of exactly the compared columns, in column order.
    pub values: IndexMap<String, String>,
}

/// A row present in both snapshots with differing values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedRow {
    pub key: String,
    pub display_key: String,
    pub before: DiffRow,
    pub after: DiffRow,
    pub changed_columns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetDiff {
    pub columns: Vec<String>,
    pub key_column: Option<String>,
    pub added: Vec<DiffRow>,
    pub removed: Vec<DiffRow>,
    pub changed: Vec<ChangedRow>,
    pub added_count: usize,
    pub removed_count: usize,
    pub changed_count: usize,
}

impl SheetDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Refreshes the per-category counts from the row lists.
    pub fn recount(&mut self) {
        self.added_count = self.added.len();
        self.removed_count = self.removed.len();
        self.changed_count = self.changed.len();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added_total: usize,
    pub removed_total: usize,
    pub changed_total: usize,
    pub sheet_count: usize,
}

/// Differences between two workbooks; only sheets with changes are listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookDiff {
    pub sheets: BTreeMap<String, SheetDiff>,
    pub summary: DiffSummary,
    pub has_changes: bool,
}

impl WorkbookDiff {
    /// Builds the diff from per-sheet results, dropping sheets without changes.
    pub fn from_sheets(sheets: impl IntoIterator<Item = (String, SheetDiff)>) -> Self {
        let mut kept = BTreeMap::new();
        let mut summary = DiffSummary::default();
        for (name, mut sheet) in sheets {
            if sheet.is_empty() {
                continue;
            }
            sheet.recount();
            summary.added_total += sheet.added_count;
            summary.removed_total += sheet.removed_count;
            summary.changed_total += sheet.changed_count;
            kept.insert(name, sheet);
        }
        summary.sheet_count = kept.len();
        Self {
            has_changes: !kept.is_empty(),
            sheets: kept,
            summary,
        }
    }
}
