//! Contract definitions for anomaly detection.
//!
//! This module contains trait definitions that providers must implement.

mod report_sink;

pub use report_sink::ReportSink;
