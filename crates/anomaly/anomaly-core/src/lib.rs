//! Anomaly Detection Core
//!
//! Aggregation of coarse-element rows, grouping into per-group series,
//! forecast-band flagging and the sequential [`AnomalyPipeline`].

pub mod aggregation;
pub mod detection;
pub mod grouping;
mod pipeline;
mod sink;

pub use aggregation::aggregate;
pub use detection::{count_from, flag_points, is_anomalous};
pub use grouping::{split_groups, GroupRows};
pub use pipeline::AnomalyPipeline;
pub use sink::CollectingSink;
