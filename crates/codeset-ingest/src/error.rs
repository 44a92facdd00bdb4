//! Error types for workbook loading.

use std::path::PathBuf;

use thiserror::Error;

use codeset_model::CodesetError;

/// Errors that can occur while loading a workbook.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Path does not exist.
    #[error("workbook not found: {path}")]
    NotFound { path: PathBuf },

    /// Extension is not a known spreadsheet or CSV format.
    #[error("unsupported workbook format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Spreadsheet could not be opened or a sheet could not be read.
    #[error("failed to read spreadsheet {path}: {message}")]
    Spreadsheet { path: PathBuf, message: String },

    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Sheet rows do not fit its header.
    #[error("invalid sheet '{sheet}' in {path}: {source}")]
    Table {
        path: PathBuf,
        sheet: String,
        #[source]
        source: CodesetError,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
