//! Spreadsheet workbook source (xlsx, xls, xlsb, ods).

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use table_spi::{parse_timestamp, CellValue, LoadError, RawTable, Result, TableSource};

/// A workbook opened for sheet-by-sheet loading.
pub struct WorkbookSource {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
}

impl WorkbookSource {
    /// Open a workbook and read its sheet directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let workbook = open_workbook_auto(&path)
            .map_err(|e| LoadError::Workbook(format!("{}: {}", path.display(), e)))?;
        Ok(Self { path, workbook })
    }
}

impl TableSource for WorkbookSource {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    fn load(&mut self, sheet: Option<&str>) -> Result<RawTable> {
        let available = self.workbook.sheet_names();
        let name = match sheet {
            Some(name) => name.to_string(),
            None => available
                .first()
                .cloned()
                .ok_or_else(|| LoadError::Workbook("workbook has no sheets".to_string()))?,
        };
        if !available.contains(&name) {
            return Err(LoadError::SheetNotFound {
                sheet: name,
                available,
            });
        }

        let range = self
            .workbook
            .worksheet_range(&name)
            .map_err(|e| LoadError::Workbook(format!("sheet '{}': {}", name, e)))?;

        let mut rows = range.rows();
        let header = rows.next().ok_or(LoadError::MissingHeader)?;
        let columns = header_names(header);

        let rows: Vec<Vec<CellValue>> = rows
            .map(|row| row.iter().map(convert_cell).collect())
            .collect();

        let table = RawTable::new(columns, rows)?;
        tracing::info!(
            path = %self.path.display(),
            sheet = %name,
            rows = table.row_count(),
            "loaded worksheet"
        );
        Ok(table)
    }
}

/// Header labels; blank headers get positional names.
fn header_names(header: &[Data]) -> Vec<String> {
    header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let label = cell.to_string();
            let label = label.trim();
            if label.is_empty() {
                format!("Unnamed: {}", i)
            } else {
                label.to_string()
            }
        })
        .collect()
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) if s.trim().is_empty() => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or(CellValue::Null, CellValue::DateTime),
        Data::DateTimeIso(s) => {
            parse_timestamp(s).map_or_else(|| CellValue::Text(s.clone()), CellValue::DateTime)
        }
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
