//! Time-column coercion.

use table_spi::{CellValue, RawTable};

/// Convert every cell of a column to a timestamp in place.
///
/// Unparsable or non-temporal cells become `Null`. Returns how many non-null
/// cells were nulled by the coercion.
pub fn coerce_time_column(table: &mut RawTable, idx: usize) -> usize {
    let mut malformed = 0;
    table.map_column(idx, |cell| match cell.to_timestamp() {
        Some(ts) => CellValue::DateTime(ts),
        None => {
            if !cell.is_null() {
                malformed += 1;
            }
            CellValue::Null
        }
    });

    if malformed > 0 {
        tracing::debug!(malformed, "time column values could not be parsed");
    }
    malformed
}
