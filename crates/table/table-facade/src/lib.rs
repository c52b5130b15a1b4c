//! Table Facade
//!
//! Unified re-exports for table loading:
//! - `RawTable`, `CellValue`, `LoadError` and the `TableSource` trait from SPI
//! - CSV and workbook sources, `SheetCache`, `Workbook` and coercion from Core

// Re-export everything from SPI
pub use table_spi::*;

// Re-export everything from Core
pub use table_core::*;
