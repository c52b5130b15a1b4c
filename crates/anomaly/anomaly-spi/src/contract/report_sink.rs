//! Report sink trait definition.

use crate::model::{GroupChart, GroupFailure, RunOutcome};

/// Receives the results of a detection run as they are produced.
///
/// Calls arrive in group processing order: zero or more `group_flagged` /
/// `group_failed` calls, then exactly one `finish` once every group has
/// been processed. A fatal error before the loop completes means `finish`
/// is never called.
pub trait ReportSink {
    /// A group crossed the anomaly threshold.
    fn group_flagged(&mut self, chart: &GroupChart);

    /// Fitting or predicting failed for a group.
    fn group_failed(&mut self, failure: &GroupFailure);

    /// The run completed.
    fn finish(&mut self, outcome: &RunOutcome);
}
