//! Error types for transformer generation.

use std::fmt;

use thiserror::Error;

/// A local code resolving to more than one distinct entry within one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateCode {
    pub sheet: String,
    pub code: String,
    /// Spreadsheet row numbers of every row carrying the code.
    pub rows: Vec<usize>,
}

impl fmt::Display for DuplicateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .rows
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "{} rows {rows} have duplicate CODE '{}'",
            self.sheet, self.code
        )
    }
}

#[derive(Debug, Error)]
pub enum TransformerError {
    /// Export refused: duplicate local codes would collide in the output.
    #[error("duplicate local codes: {}", join_duplicates(.0))]
    DuplicateCodes(Vec<DuplicateCode>),
    #[error("failed to write transformer XML: {0}")]
    Write(String),
}

fn join_duplicates(duplicates: &[DuplicateCode]) -> String {
    duplicates
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, TransformerError>;
