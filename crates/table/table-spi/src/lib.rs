//! Table Service Provider Interface
//!
//! Defines the in-memory table model, loader errors, and the contract that
//! file-backed table sources implement.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::TableSource;
pub use error::{LoadError, Result};
pub use model::{parse_timestamp, CellValue, RawTable, TIMESTAMP_FORMATS};
