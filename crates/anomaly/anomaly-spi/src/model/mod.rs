//! Data models for anomaly detection.
//!
//! This module contains data structures used throughout the anomaly detection system.

mod chart;
mod flagged_point;
mod group;
mod outcome;
mod report;

pub use chart::GroupChart;
pub use flagged_point::FlaggedPoint;
pub use group::{GroupKey, GroupSeries};
pub use outcome::{GroupFailure, RunOutcome};
pub use report::{AnomalyReport, ReportEntry};
