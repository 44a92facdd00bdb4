#![deny(unsafe_code)]

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CodesetError, Result};

/// One sheet of a workbook: ordered column names and positional string rows.
///
/// Column names may repeat; rows are stored positionally so every duplicate
/// header keeps its own values. Cells are never null, an empty string means
/// "no value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl LogicalTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table, padding short rows with empty cells.
    ///
    /// # Errors
    ///
    /// Returns [`CodesetError::RowWidth`] when a row is wider than the header.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Appends a row, padding it to the table width.
    ///
    /// # Errors
    ///
    /// Returns [`CodesetError::RowWidth`] when the row is wider than the header.
    pub fn push_row(&mut self, mut row: Vec<String>) -> Result<()> {
        if row.len() > self.columns.len() {
            return Err(CodesetError::RowWidth {
                row: self.rows.len(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    /// Positions of every column carrying exactly `name`.
    pub fn column_positions(&self, name: &str) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.as_str() == name)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Position of the canonical column for `name`.
    ///
    /// When the header repeats, the densest variant wins (see [`pick_canonical`]).
    pub fn canonical_position(&self, name: &str) -> Option<usize> {
        let positions = self.column_positions(name);
        match positions.len() {
            0 => None,
            1 => Some(positions[0]),
            _ => {
                let variants: Vec<Vec<&str>> = positions
                    .iter()
                    .map(|&pos| self.column_at(pos).collect())
                    .collect();
                pick_canonical(&variants).map(|picked| positions[picked])
            }
        }
    }

    /// Cell values of the column at `position`, in row order.
    pub fn column_at(&self, position: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(position).map_or("", String::as_str))
    }

    /// Trimmed values of the canonical column for `name`; empty strings when absent.
    pub fn column_values(&self, name: &str) -> Vec<String> {
        match self.canonical_position(name) {
            Some(position) => self
                .column_at(position)
                .map(|value| value.trim().to_string())
                .collect(),
            None => vec![String::new(); self.rows.len()],
        }
    }

    pub fn cell(&self, row: usize, position: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(position))
            .map_or("", String::as_str)
    }

    /// Trimmed cell value of the canonical column `name` in `row`.
    pub fn value(&self, row: usize, name: &str) -> &str {
        self.canonical_position(name)
            .map_or("", |position| self.cell(row, position).trim())
    }

    pub fn set_cell(&mut self, row: usize, position: usize, value: impl Into<String>) {
        if let Some(cell) = self
            .rows
            .get_mut(row)
            .and_then(|cells| cells.get_mut(position))
        {
            *cell = value.into();
        }
    }

    /// Adds a column filled from `values`; missing trailing values are empty.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.columns.push(name.into());
        let mut values = values.into_iter();
        for row in &mut self.rows {
            row.push(values.next().unwrap_or_default());
        }
    }
}

/// Chooses the canonical variant among duplicate-named columns.
///
/// The variant with the most non-blank cells wins; ties go to the earliest
/// variant. Returns `None` only for an empty slice.
pub fn pick_canonical<S: AsRef<str>>(variants: &[Vec<S>]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (idx, values) in variants.iter().enumerate() {
        let filled = values
            .iter()
            .filter(|value| !value.as_ref().trim().is_empty())
            .count();
        match best {
            Some((_, best_filled)) if filled <= best_filled => {}
            _ => best = Some((idx, filled)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Ordered collection of named sheets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workbook {
    sheets: IndexMap<String, LogicalTable>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a sheet, keeping the original position on replace.
    pub fn insert_sheet(&mut self, name: impl Into<String>, table: LogicalTable) {
        self.sheets.insert(name.into(), table);
    }

    pub fn sheet(&self, name: &str) -> Option<&LogicalTable> {
        self.sheets.get(name)
    }

    /// # Errors
    ///
    /// Returns [`CodesetError::UnknownSheet`] when the sheet does not exist.
    pub fn sheet_mut(&mut self, name: &str) -> Result<&mut LogicalTable> {
        self.sheets
            .get_mut(name)
            .ok_or_else(|| CodesetError::UnknownSheet(name.to_string()))
    }

    pub fn sheets(&self) -> impl Iterator<Item = (&str, &LogicalTable)> {
        self.sheets.iter().map(|(name, table)| (name.as_str(), table))
    }

    pub fn sheets_mut(&mut self) -> impl Iterator<Item = (&str, &mut LogicalTable)> {
        self.sheets
            .iter_mut()
            .map(|(name, table)| (name.as_str(), table))
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl FromIterator<(String, LogicalTable)> for Workbook {
    fn from_iter<T: IntoIterator<Item = (String, LogicalTable)>>(iter: T) -> Self {
        Self {
            sheets: iter.into_iter().collect(),
        }
    }
}
