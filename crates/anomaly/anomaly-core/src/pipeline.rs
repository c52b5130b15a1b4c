//! The sequential per-group detection run.

use anomaly_api::DetectionConfig;
use anomaly_spi::{
    AnomalyError, GroupChart, GroupFailure, GroupSeries, ReportSink, Result, RunOutcome,
};
use chrono::NaiveDateTime;
use forecast_api::ForecastConfig;
use forecast_core::holidays::years_between;
use forecast_core::{holiday_calendar, AdditiveForecaster};
use forecast_spi::{Forecast, Forecaster, HolidayCalendar, ModelSpec};
use table_core::coerce_time_column;
use table_spi::RawTable;

use crate::aggregation::aggregate;
use crate::detection::{count_from, flag_points};
use crate::grouping::{column_index, split_groups};

/// Per-group outcome of the forecast stage.
enum GroupResult {
    Skipped,
    Failed(String),
    Scored { count: usize, chart: GroupChart },
}

/// Fits a forecast per group and flags groups whose observations leave the
/// confidence band after the change point.
pub struct AnomalyPipeline {
    forecaster: Box<dyn Forecaster>,
    calendar: Box<dyn HolidayCalendar>,
    config: ForecastConfig,
}

impl AnomalyPipeline {
    pub fn new(
        forecaster: Box<dyn Forecaster>,
        calendar: Box<dyn HolidayCalendar>,
        config: ForecastConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            forecaster,
            calendar,
            config,
        })
    }

    /// The additive forecaster and the configured country's holidays.
    pub fn with_defaults(config: ForecastConfig) -> Result<Self> {
        let forecaster = AdditiveForecaster::new(config.clone())?;
        let calendar = holiday_calendar(&config.country)?;
        Self::new(Box::new(forecaster), calendar, config)
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Analyse every group of `table`.
    ///
    /// Column and configuration problems are returned as errors before any
    /// group is processed. Forecast failures are isolated per group and
    /// reported to `sink`.
    pub fn run(
        &self,
        table: &RawTable,
        detection: &DetectionConfig,
        sink: &mut dyn ReportSink,
    ) -> Result<RunOutcome> {
        detection.validate()?;

        let time_name = resolve_column(table, detection.time_column.as_deref(), 0, "time_column")?;
        let kpi_name = resolve_column(table, detection.kpi_column.as_deref(), 1, "kpi_column")?;
        let group_name = detection.group_column.clone();
        let time_idx = column_index(table, &time_name)?;
        column_index(table, &kpi_name)?;
        column_index(table, &group_name)?;

        tracing::info!(
            rows = table.row_count(),
            group = %group_name,
            time = %time_name,
            kpi = %kpi_name,
            change_point = %detection.change_point,
            threshold = detection.threshold,
            forecaster = self.forecaster.name(),
            "starting anomaly run"
        );

        let mut working = table.clone();
        let malformed = coerce_time_column(&mut working, time_idx);
        if malformed > 0 {
            tracing::warn!(malformed, column = %time_name, "unparsable timestamps treated as missing");
        }

        let working = match detection.effective_reducer() {
            Some(reducer) => aggregate(&working, &group_name, &time_name, &kpi_name, reducer)?,
            None => {
                if let Some(reducer) = detection.reducer {
                    tracing::warn!(%reducer, column = %group_name, "reducer ignored: grouping column is not a base-station element");
                }
                working
            }
        };

        let groups = split_groups(
            &working,
            column_index(&working, &group_name)?,
            column_index(&working, &time_name)?,
            column_index(&working, &kpi_name)?,
        );

        let mut outcome = RunOutcome {
            groups: groups.len(),
            ..RunOutcome::default()
        };

        for rows in groups {
            let key = rows.key.clone();
            let result = if rows.valid_points() < 2 {
                GroupResult::Skipped
            } else if let Some(bad) = rows.non_numeric.first() {
                GroupResult::Failed(format!("non-numeric value '{}'", bad))
            } else {
                self.score_group(rows.into_series(), &kpi_name, detection.change_point)
            };

            match result {
                GroupResult::Skipped => {
                    tracing::debug!(group = %key, "fewer than 2 valid points; skipped");
                    outcome.skipped.push(key);
                }
                GroupResult::Failed(reason) => {
                    tracing::warn!(group = %key, %reason, "forecast failed for group");
                    let failure = GroupFailure::new(key, reason);
                    sink.group_failed(&failure);
                    outcome.failures.push(failure);
                }
                GroupResult::Scored { count, chart } => {
                    tracing::debug!(group = %key, anomalies = count, "group scored");
                    if count >= detection.threshold {
                        sink.group_flagged(&chart);
                        outcome.report.push(key, count);
                    }
                }
            }
        }

        tracing::info!(
            groups = outcome.groups,
            flagged = outcome.report.len(),
            failed = outcome.failures.len(),
            skipped = outcome.skipped.len(),
            "anomaly run complete"
        );
        sink.finish(&outcome);
        Ok(outcome)
    }

    fn score_group(&self, series: GroupSeries, kpi: &str, change_point: NaiveDateTime) -> GroupResult {
        match self.forecast(&series, change_point) {
            Ok(forecast) => {
                let points = flag_points(&series.observations, &forecast);
                let count = count_from(&points, change_point);
                let anomalies = points
                    .into_iter()
                    .filter(|p| p.anomalous && p.timestamp >= change_point)
                    .collect();
                GroupResult::Scored {
                    count,
                    chart: GroupChart {
                        group: series.key,
                        kpi: kpi.to_string(),
                        change_point,
                        forecast: forecast.points().to_vec(),
                        actual: series.observations,
                        anomalies,
                    },
                }
            }
            Err(e) => GroupResult::Failed(e.to_string()),
        }
    }

    fn forecast(&self, series: &GroupSeries, change_point: NaiveDateTime) -> forecast_spi::Result<Forecast> {
        let spec = self.model_spec(series, change_point)?;
        let model = self.forecaster.fit(&series.observations, &spec)?;
        let future = model.make_future(self.config.horizon, self.config.frequency)?;
        model.predict(&future)
    }

    /// Holidays and an explicit trend break only when the change point is
    /// one of this group's own timestamps.
    fn model_spec(
        &self,
        series: &GroupSeries,
        change_point: NaiveDateTime,
    ) -> forecast_spi::Result<ModelSpec> {
        let spec = ModelSpec::default()
            .with_seasonality(self.config.daily_seasonality, self.config.weekly_seasonality);
        if !series.contains_timestamp(change_point) {
            return Ok(spec);
        }

        let years = match &self.config.holiday_years {
            Some(years) => years.clone(),
            None => match (series.observations.first(), series.observations.last()) {
                (Some(first), Some(last)) => {
                    let end = self.config.frequency.advance(last.timestamp, self.config.horizon)?;
                    years_between(first.timestamp.date(), end.date())
                }
                _ => Vec::new(),
            },
        };
        Ok(spec
            .with_holidays(self.calendar.holidays(&years))
            .with_changepoint(change_point))
    }
}

/// An explicit column name, or the column at `fallback` when unset.
fn resolve_column(
    table: &RawTable,
    explicit: Option<&str>,
    fallback: usize,
    role: &str,
) -> Result<String> {
    match explicit {
        Some(name) => Ok(name.to_string()),
        None => table
            .columns()
            .get(fallback)
            .cloned()
            .ok_or_else(|| AnomalyError::InvalidParameter {
                name: role.to_string(),
                reason: format!("table has only {} column(s)", table.column_count()),
            }),
    }
}
