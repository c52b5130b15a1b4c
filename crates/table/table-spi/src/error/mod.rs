//! Error types for table loading.

mod load_error;

pub use load_error::{LoadError, Result};
