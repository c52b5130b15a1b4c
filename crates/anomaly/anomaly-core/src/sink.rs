use anomaly_spi::{GroupChart, GroupFailure, ReportSink, RunOutcome};

/// A [`ReportSink`] that keeps everything it receives.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub charts: Vec<GroupChart>,
    pub failures: Vec<GroupFailure>,
    pub outcome: Option<RunOutcome>,
}

impl ReportSink for CollectingSink {
    fn group_flagged(&mut self, chart: &GroupChart) {
        self.charts.push(chart.clone());
    }

    fn group_failed(&mut self, failure: &GroupFailure) {
        self.failures.push(failure.clone());
    }

    fn finish(&mut self, outcome: &RunOutcome) {
        self.outcome = Some(outcome.clone());
    }
}
