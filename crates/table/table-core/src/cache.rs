//! Sheet cache and workbook session.

use std::path::Path;

use table_spi::{LoadError, RawTable, Result, TableSource};

/// Holds the most recently loaded sheet, keyed by sheet name.
///
/// Asking for the cached sheet again returns it without reparsing; asking for
/// any other sheet drops the cached entry and loads the new one.
#[derive(Debug, Default)]
pub struct SheetCache {
    entry: Option<(String, RawTable)>,
}

impl SheetCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the cached sheet, if any.
    pub fn cached_sheet(&self) -> Option<&str> {
        self.entry.as_ref().map(|(key, _)| key.as_str())
    }

    /// The cached table, if it belongs to `sheet`.
    pub fn get(&self, sheet: &str) -> Option<&RawTable> {
        match &self.entry {
            Some((key, table)) if key == sheet => Some(table),
            _ => None,
        }
    }

    /// Return the table for `sheet`, calling `load` only on a cache miss.
    ///
    /// A failed load leaves the cache empty.
    pub fn get_or_load<F>(&mut self, sheet: &str, load: F) -> Result<&RawTable>
    where
        F: FnOnce(&str) -> Result<RawTable>,
    {
        let entry = match self.entry.take() {
            Some((key, table)) if key == sheet => (key, table),
            previous => {
                if let Some((key, _)) = previous {
                    tracing::debug!(previous = %key, sheet, "sheet changed, invalidating cache");
                }
                (sheet.to_string(), load(sheet)?)
            }
        };
        Ok(&self.entry.insert(entry).1)
    }

    /// Drop the cached table.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

/// A table source paired with a sheet cache.
pub struct Workbook {
    source: Box<dyn TableSource>,
    cache: SheetCache,
}

impl Workbook {
    /// Open a file with [`crate::open_source`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(crate::open_source(path)?))
    }

    /// Wrap an existing source.
    pub fn new(source: Box<dyn TableSource>) -> Self {
        Self {
            source,
            cache: SheetCache::new(),
        }
    }

    /// Sheets offered by the underlying source.
    pub fn sheet_names(&self) -> Vec<String> {
        self.source.sheet_names()
    }

    /// Name of the sheet currently held in the cache.
    pub fn cached_sheet(&self) -> Option<&str> {
        self.cache.cached_sheet()
    }

    /// Select a sheet (the first one when `None`) and return its table.
    pub fn select(&mut self, sheet: Option<&str>) -> Result<&RawTable> {
        let available = self.source.sheet_names();
        let name = match sheet {
            Some(name) if available.iter().any(|s| s == name) => name.to_string(),
            Some(name) => {
                return Err(LoadError::SheetNotFound {
                    sheet: name.to_string(),
                    available,
                })
            }
            None => available
                .into_iter()
                .next()
                .ok_or_else(|| LoadError::Workbook("source has no sheets".to_string()))?,
        };

        let source = &mut self.source;
        self.cache.get_or_load(&name, |s| source.load(Some(s)))
    }
}
