//! Terminal report sink.

use std::io::{self, Stderr, Stdout, Write};

use anomaly_spi::{GroupChart, GroupFailure, ReportSink, RunOutcome};

use crate::{chart::render_chart, completion_notice, summary::render_summary, NO_ANOMALIES};

/// Output switches for [`TerminalReporter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Draw a chart per flagged group.
    pub charts: bool,
    /// Write the outcome as JSON instead of tables and charts.
    pub json: bool,
    pub chart_width: u16,
    pub chart_height: u16,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            charts: true,
            json: false,
            chart_width: 100,
            chart_height: 25,
        }
    }
}

/// Writes charts and the summary to `out` and warnings to `err`.
///
/// In JSON mode `out` receives only the serialized [`RunOutcome`]; the
/// completion notice goes to `err`. Write failures are kept and can be
/// retrieved with [`TerminalReporter::take_error`].
pub struct TerminalReporter<W: Write, E: Write> {
    out: W,
    err: E,
    options: ReportOptions,
    group_label: String,
    error: Option<io::Error>,
}

impl TerminalReporter<Stdout, Stderr> {
    /// Reporter on the process's standard streams.
    pub fn stdio(options: ReportOptions) -> Self {
        Self::new(io::stdout(), io::stderr(), options)
    }
}

impl<W: Write, E: Write> TerminalReporter<W, E> {
    pub fn new(out: W, err: E, options: ReportOptions) -> Self {
        Self {
            out,
            err,
            options,
            group_label: "group".to_string(),
            error: None,
        }
    }

    /// Header of the group column in the summary table.
    pub fn group_label(mut self, label: &str) -> Self {
        self.group_label = label.to_string();
        self
    }

    /// First write failure, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    fn keep(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            tracing::error!(error = %e, "failed to write report");
            self.error.get_or_insert(e);
        }
    }

    fn write_summary(&mut self, outcome: &RunOutcome) -> io::Result<()> {
        if self.options.json {
            serde_json::to_writer_pretty(&mut self.out, outcome).map_err(io::Error::from)?;
            writeln!(self.out)?;
            writeln!(self.err, "{}", completion_notice(outcome.groups))?;
        } else {
            if outcome.report.is_empty() {
                writeln!(self.out, "{}", NO_ANOMALIES)?;
            } else {
                writeln!(self.out, "{}", render_summary(&outcome.report, &self.group_label))?;
            }
            writeln!(self.out, "{}", completion_notice(outcome.groups))?;
        }
        self.out.flush()
    }
}

impl<W: Write, E: Write> ReportSink for TerminalReporter<W, E> {
    fn group_flagged(&mut self, chart: &GroupChart) {
        if self.options.json || !self.options.charts {
            return;
        }
        let text = render_chart(chart, self.options.chart_width, self.options.chart_height);
        let result = writeln!(self.out, "{}\n", text);
        self.keep(result);
    }

    fn group_failed(&mut self, failure: &GroupFailure) {
        let result = writeln!(
            self.err,
            "Warning: failed to process group '{}': {}",
            failure.group, failure.reason
        );
        self.keep(result);
    }

    fn finish(&mut self, outcome: &RunOutcome) {
        let result = self.write_summary(outcome);
        self.keep(result);
    }
}
