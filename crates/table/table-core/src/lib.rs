//! Table Core
//!
//! Loaders for CSV files and spreadsheet workbooks, the per-sheet cache, and
//! time-column coercion.

mod cache;
mod coerce;
mod csv_source;
mod workbook_source;

use std::path::Path;

pub use cache::{SheetCache, Workbook};
pub use coerce::coerce_time_column;
pub use csv_source::CsvSource;
pub use workbook_source::WorkbookSource;

// Re-export SPI types for implementations
pub use table_spi::{CellValue, LoadError, RawTable, Result, TableSource};

/// Extensions read as spreadsheet workbooks.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Open a table source, choosing the reader from the file extension.
pub fn open_source(path: impl AsRef<Path>) -> Result<Box<dyn TableSource>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => Ok(Box::new(CsvSource::new(path))),
        e if WORKBOOK_EXTENSIONS.contains(&e) => Ok(Box::new(WorkbookSource::open(path)?)),
        "" => Err(LoadError::UnsupportedFormat(format!(
            "{} has no file extension",
            path.display()
        ))),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}
