//! Contract definitions for table loading.

mod table_source;

pub use table_source::TableSource;
