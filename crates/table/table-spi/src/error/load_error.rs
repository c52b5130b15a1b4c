//! Load error types.

use thiserror::Error;

/// Errors raised while reading a table from a file.
///
/// All variants are fatal for a run: nothing is analysed once loading fails.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// File could not be opened or read
    #[error("Failed to read '{path}': {message}")]
    Io { path: String, message: String },

    /// CSV parse failure
    #[error("CSV parse error: {0}")]
    Csv(String),

    /// Spreadsheet parse failure
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// Requested worksheet does not exist
    #[error("Sheet '{sheet}' not found (available: {})", available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    /// File extension is not a supported table format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Source has no header row
    #[error("Missing header row")]
    MissingHeader,

    /// A data row does not match the header width
    #[error("Row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, LoadError>;
