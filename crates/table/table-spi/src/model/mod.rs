//! Data models for tabular input.

mod cell;
mod raw_table;
mod timestamp;

pub use cell::CellValue;
pub use raw_table::RawTable;
pub use timestamp::{parse_timestamp, TIMESTAMP_FORMATS};
