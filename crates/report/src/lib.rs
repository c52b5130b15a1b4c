//! Reporting for anomaly runs.
//!
//! Charts and tables are drawn with ratatui widgets into an off-screen
//! buffer and written out as plain text, so no terminal is required.

mod chart;
mod render;
mod summary;
mod terminal;

pub use chart::{create_anomaly_chart, render_chart, ChartData};
pub use render::buffer_to_string;
pub use summary::render_summary;
pub use terminal::{ReportOptions, TerminalReporter};

/// Printed when no group reaches the threshold.
pub const NO_ANOMALIES: &str = "No anomalies detected.";

/// Completion notice for a run over `groups` groups.
pub fn completion_notice(groups: usize) -> String {
    format!("Processing complete: {} groups analysed", groups)
}
