//! Forecaster traits

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::model::{Forecast, Frequency, ModelSpec, Observation};

/// Fits forecasting models to a single series.
pub trait Forecaster: Send + Sync {
    /// Fit a model to `history`.
    ///
    /// Fails on malformed or insufficient input.
    fn fit(&self, history: &[Observation], spec: &ModelSpec) -> Result<Box<dyn FittedModel>>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// A model fitted to one series.
pub trait FittedModel: Send + Sync {
    /// Unique training timestamps in ascending order.
    fn history_timestamps(&self) -> &[NaiveDateTime];

    /// Predict a point estimate and uncertainty band for each timestamp.
    fn predict(&self, timestamps: &[NaiveDateTime]) -> Result<Forecast>;

    /// The training timestamps followed by `periods` steps of `frequency`
    /// strictly after the last one.
    ///
    /// Fails when the last step falls outside the representable time range.
    fn make_future(&self, periods: usize, frequency: Frequency) -> Result<Vec<NaiveDateTime>> {
        let history = self.history_timestamps();
        let mut timestamps = history.to_vec();
        if let Some(&last) = history.last() {
            frequency.advance(last, periods)?;
            for i in 1..=periods {
                timestamps.push(frequency.advance(last, i)?);
            }
        }
        Ok(timestamps)
    }
}
