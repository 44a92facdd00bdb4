use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodesetError {
    #[error("row {row} has {actual} cells but the table has {expected} columns")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unknown sheet: {0}")]
    UnknownSheet(String),
}

pub type Result<T> = std::result::Result<T, CodesetError>;
