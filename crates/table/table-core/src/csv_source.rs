//! CSV table source.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use table_spi::{CellValue, LoadError, RawTable, Result, TableSource};

/// A CSV file read with a header row. Parsing happens on [`TableSource::load`].
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    /// Create a source for the given path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse CSV text from any reader.
    pub fn read_from<R: Read>(reader: R) -> Result<RawTable> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| LoadError::Csv(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if columns.iter().all(String::is_empty) {
            return Err(LoadError::MissingHeader);
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| LoadError::Csv(e.to_string()))?;
            rows.push(record.iter().map(CellValue::infer).collect());
        }

        RawTable::new(columns, rows)
    }
}

impl TableSource for CsvSource {
    fn sheet_names(&self) -> Vec<String> {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        vec![stem]
    }

    fn load(&mut self, _sheet: Option<&str>) -> Result<RawTable> {
        let file = File::open(&self.path).map_err(|e| LoadError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        let table = Self::read_from(BufReader::new(file))?;
        tracing::info!(
            path = %self.path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded CSV table"
        );
        Ok(table)
    }
}
