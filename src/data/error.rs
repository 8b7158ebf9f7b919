//! Error types for data operations
//!
//! Every way an upload can fail to become a dataset. Callers surface these
//! as a user-visible message and keep the session awaiting a new upload.

use crate::types::FileFormat;
use thiserror::Error;

pub use crate::constants::{MAX_FILE_SIZE_MB, MAX_ROWS};

/// Errors that can occur while turning an upload into a dataset
#[derive(Error, Debug)]
pub enum DataError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV/TSV parsing error from polars
    #[error("CSV parse error: {0}")]
    Csv(#[from] polars::error::PolarsError),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Spreadsheet parsing error from calamine
    #[error("Spreadsheet parse error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// File is too large to load
    #[error("File too large: {size_mb}MB (max {max_mb}MB)")]
    TooLarge { size_mb: u64, max_mb: usize },

    /// Too many rows to load
    #[error("Too many rows: {rows} (max {max_rows})")]
    TooManyRows { rows: usize, max_rows: usize },

    /// File is empty
    #[error("Empty file")]
    EmptyFile,

    /// No columns found in data
    #[error("No columns found")]
    NoColumns,

    /// Extension is not one of the known formats
    #[error("Unsupported file type: {file_name}")]
    UnsupportedFormat { file_name: String },

    /// Known format, but this dashboard does not take it
    #[error("This dashboard does not accept {format} files")]
    NotAccepted { format: FileFormat },

    /// Two columns share a name
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A column's length differs from the others
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;
