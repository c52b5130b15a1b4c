//! Anomaly Detection Service Provider Interface
//!
//! Defines the per-group detection data model, its error type and the
//! contract through which results are reported.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::ReportSink;
pub use error::{AnomalyError, Result};
pub use model::{
    AnomalyReport, FlaggedPoint, GroupChart, GroupFailure, GroupKey, GroupSeries, ReportEntry,
    RunOutcome,
};
