//! Table source trait definition.

use crate::error::Result;
use crate::model::RawTable;

/// A file-backed source of tabular data.
///
/// Single-table formats (CSV) report one unnamed sheet and ignore the
/// `sheet` argument; workbooks parse the named worksheet on every call.
pub trait TableSource {
    /// Names of the sheets available in this source.
    fn sheet_names(&self) -> Vec<String>;

    /// Parse a sheet into a table. `None` selects the first sheet.
    fn load(&mut self, sheet: Option<&str>) -> Result<RawTable>;
}
