//! Error types for the data-loader crate.
//!
//! Only loading can fail. Once a `CatalogIndex` exists every query on it
//! is infallible: missing keys come back as `None` or an empty slice.

use thiserror::Error;

/// Errors that can occur while reading the catalog file
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected the input (bad quoting, invalid UTF-8, ...)
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// A row in the catalog file couldn't be turned into a title
    ///
    /// `line` is 1-based and counts the header row, so it matches what an
    /// editor shows.
    #[error("Parse error at line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// The header row lacks a column every title needs
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
