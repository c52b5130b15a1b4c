//! Additive trend + seasonality + holiday forecaster.
//!
//! The model is `y(t) = trend(t) + seasonal(t) + holidays(t)` where the
//! trend is piecewise linear with rate changes at changepoints, seasonal
//! terms are truncated Fourier series and holiday terms are per-name
//! indicator effects. Coefficients are fitted by penalised least squares
//! on time scaled to `[0, 1]` over the history and values scaled by their
//! maximum magnitude.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use forecast_api::ForecastConfig;
use forecast_spi::{
    FittedModel, Forecast, ForecastError, ForecastPoint, Forecaster, ModelSpec, Observation,
    Result,
};

use crate::confidence::{band, residual_std};
use crate::linalg::solve;
use crate::seasonality::{days_since_epoch, FourierSeasonality};

/// Noise variance assumed when turning prior scales into ridge penalties.
const NOISE_VARIANCE: f64 = 0.01;

/// Prior scale of the base intercept and growth rate.
const TREND_PRIOR_SCALE: f64 = 5.0;

/// Default [`Forecaster`]: fits an [`AdditiveModel`] per call.
#[derive(Debug, Clone, Default)]
pub struct AdditiveForecaster {
    config: ForecastConfig,
}

impl AdditiveForecaster {
    /// Create a forecaster after validating `config`.
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    fn seasonalities(&self, spec: &ModelSpec) -> Vec<FourierSeasonality> {
        let mut out = Vec::new();
        if spec.daily_seasonality && self.config.daily_fourier_order > 0 {
            out.push(FourierSeasonality::daily(self.config.daily_fourier_order));
        }
        if spec.weekly_seasonality && self.config.weekly_fourier_order > 0 {
            out.push(FourierSeasonality::weekly(self.config.weekly_fourier_order));
        }
        out
    }

    fn automatic_changepoints(&self, scaled: &[f64]) -> Vec<f64> {
        let in_range = (scaled.len() as f64 * self.config.changepoint_range).floor() as usize;
        let count = self.config.n_changepoints.min(in_range.saturating_sub(1));
        if count == 0 {
            return Vec::new();
        }

        let last = (in_range - 1) as f64;
        let mut out: Vec<f64> = (1..=count)
            .map(|i| {
                let idx = (last * i as f64 / count as f64).round() as usize;
                scaled[idx]
            })
            .collect();
        out.dedup();
        out
    }
}

impl Forecaster for AdditiveForecaster {
    fn fit(&self, history: &[Observation], spec: &ModelSpec) -> Result<Box<dyn FittedModel>> {
        if history.len() < 2 {
            return Err(ForecastError::InsufficientData {
                required: 2,
                actual: history.len(),
            });
        }
        if let Some(bad) = history.iter().find(|o| !o.value.is_finite()) {
            return Err(ForecastError::NumericalError(format!(
                "non-finite value at {}",
                bad.timestamp
            )));
        }

        let mut sorted = history.to_vec();
        sorted.sort_by_key(|o| o.timestamp);
        let start = sorted[0].timestamp;
        let end = sorted[sorted.len() - 1].timestamp;
        let span = seconds_between(start, end);
        if span <= 0.0 {
            return Err(ForecastError::InvalidTimestamps(
                "history spans zero time".to_string(),
            ));
        }

        let y_scale = sorted
            .iter()
            .map(|o| o.value.abs())
            .fold(0.0_f64, f64::max);
        let y_scale = if y_scale > 0.0 { y_scale } else { 1.0 };

        let scaled_t: Vec<f64> = sorted
            .iter()
            .map(|o| seconds_between(start, o.timestamp) / span)
            .collect();

        let changepoints = if spec.changepoints.is_empty() {
            self.automatic_changepoints(&scaled_t)
        } else {
            let mut cps = Vec::with_capacity(spec.changepoints.len());
            for &cp in &spec.changepoints {
                if cp < start || cp > end {
                    return Err(ForecastError::InvalidParameter {
                        name: "changepoints".to_string(),
                        reason: format!("{} is outside the history [{}, {}]", cp, start, end),
                    });
                }
                cps.push(seconds_between(start, cp) / span);
            }
            cps.sort_by(f64::total_cmp);
            cps.dedup();
            cps
        };

        let seasonalities = self.seasonalities(spec);

        // Only holidays that fall on an observed date carry information.
        let observed_dates: BTreeSet<NaiveDate> =
            sorted.iter().map(|o| o.timestamp.date()).collect();
        let mut holidays: Vec<HolidayEffect> = Vec::new();
        for holiday in &spec.holidays {
            if !observed_dates.contains(&holiday.date) {
                continue;
            }
            match holidays.iter_mut().find(|h| h.name == holiday.name) {
                Some(effect) => effect.dates.push(holiday.date),
                None => holidays.push(HolidayEffect {
                    name: holiday.name.clone(),
                    dates: vec![holiday.date],
                }),
            }
        }
        // Future-only dates for names that are already modelled.
        for holiday in &spec.holidays {
            if let Some(effect) = holidays.iter_mut().find(|h| h.name == holiday.name) {
                if !effect.dates.contains(&holiday.date) {
                    effect.dates.push(holiday.date);
                }
            }
        }

        let mut model = AdditiveModel {
            start,
            span,
            y_scale,
            changepoints,
            seasonalities,
            holidays,
            beta: Vec::new(),
            sigma: 0.0,
            mean_abs_delta: 0.0,
            interval_width: self.config.interval_width,
            history: Vec::new(),
        };

        let penalties = model.penalties(&self.config);
        let width = penalties.len();
        let mut xtx = vec![0.0; width * width];
        let mut xty = vec![0.0; width];
        let mut rows = Vec::with_capacity(sorted.len());
        for obs in &sorted {
            let row = model.design_row(obs.timestamp);
            let y = obs.value / y_scale;
            for i in 0..width {
                xty[i] += row[i] * y;
                for j in 0..width {
                    xtx[i * width + j] += row[i] * row[j];
                }
            }
            rows.push((row, y));
        }
        for (i, penalty) in penalties.iter().enumerate() {
            xtx[i * width + i] += penalty;
        }

        model.beta = solve(&xtx, &xty, width)?;

        let residuals: Vec<f64> = rows.iter().map(|(row, y)| y - dot(row, &model.beta)).collect();
        model.sigma = residual_std(&residuals);

        let deltas = model.deltas();
        model.mean_abs_delta = if deltas.is_empty() {
            0.0
        } else {
            deltas.iter().map(|d| d.abs()).sum::<f64>() / deltas.len() as f64
        };

        let mut timestamps: Vec<NaiveDateTime> = sorted.iter().map(|o| o.timestamp).collect();
        timestamps.dedup();
        model.history = timestamps;

        tracing::debug!(
            observations = sorted.len(),
            changepoints = model.changepoints.len(),
            seasonalities = model.seasonalities.len(),
            holidays = model.holidays.len(),
            sigma = model.sigma,
            "fitted additive model"
        );

        Ok(Box::new(model))
    }

    fn name(&self) -> &str {
        "additive"
    }
}

#[derive(Debug, Clone)]
struct HolidayEffect {
    name: String,
    dates: Vec<NaiveDate>,
}

/// A fitted additive model.
#[derive(Debug, Clone)]
pub struct AdditiveModel {
    start: NaiveDateTime,
    span: f64,
    y_scale: f64,
    changepoints: Vec<f64>,
    seasonalities: Vec<FourierSeasonality>,
    holidays: Vec<HolidayEffect>,
    beta: Vec<f64>,
    sigma: f64,
    mean_abs_delta: f64,
    interval_width: f64,
    history: Vec<NaiveDateTime>,
}

impl AdditiveModel {
    /// Changepoint locations on the scaled time axis.
    pub fn changepoints(&self) -> &[f64] {
        &self.changepoints
    }

    /// Standard deviation of the in-sample residuals, in original units.
    pub fn residual_std(&self) -> f64 {
        self.sigma * self.y_scale
    }

    /// Names of the holiday effects the model carries.
    pub fn holiday_names(&self) -> Vec<&str> {
        self.holidays.iter().map(|h| h.name.as_str()).collect()
    }

    fn scaled_time(&self, timestamp: NaiveDateTime) -> f64 {
        seconds_between(self.start, timestamp) / self.span
    }

    fn deltas(&self) -> &[f64] {
        &self.beta[2..2 + self.changepoints.len()]
    }

    fn penalties(&self, config: &ForecastConfig) -> Vec<f64> {
        let trend = NOISE_VARIANCE / TREND_PRIOR_SCALE.powi(2);
        let changepoint = NOISE_VARIANCE / config.changepoint_prior_scale.powi(2);
        let seasonal = NOISE_VARIANCE / config.seasonality_prior_scale.powi(2);
        let holiday = NOISE_VARIANCE / config.holidays_prior_scale.powi(2);

        let mut out = vec![trend, trend];
        out.extend(std::iter::repeat(changepoint).take(self.changepoints.len()));
        for seasonality in &self.seasonalities {
            out.extend(std::iter::repeat(seasonal).take(seasonality.width()));
        }
        out.extend(std::iter::repeat(holiday).take(self.holidays.len()));
        out
    }

    fn design_row(&self, timestamp: NaiveDateTime) -> Vec<f64> {
        let t = self.scaled_time(timestamp);
        let mut row = vec![1.0, t];
        row.extend(self.changepoints.iter().map(|&s| (t - s).max(0.0)));

        let day = days_since_epoch(timestamp);
        for seasonality in &self.seasonalities {
            seasonality.push_features(day, &mut row);
        }

        let date = timestamp.date();
        row.extend(
            self.holidays
                .iter()
                .map(|h| if h.dates.contains(&date) { 1.0 } else { 0.0 }),
        );
        row
    }

    /// Scaled standard error at scaled time `t`.
    fn std_error(&self, t: f64) -> f64 {
        let mut variance = self.sigma.powi(2);
        if t > 1.0 && !self.changepoints.is_empty() {
            // Future rate changes arrive at the historical changepoint rate
            // with Laplace magnitudes of mean `mean_abs_delta`.
            let rate = self.changepoints.len() as f64;
            let h = t - 1.0;
            variance += rate * 2.0 * self.mean_abs_delta.powi(2) * h.powi(3) / 3.0;
        }
        variance.sqrt()
    }
}

impl FittedModel for AdditiveModel {
    fn history_timestamps(&self) -> &[NaiveDateTime] {
        &self.history
    }

    fn predict(&self, timestamps: &[NaiveDateTime]) -> Result<Forecast> {
        let mut points = Vec::with_capacity(timestamps.len());
        for &timestamp in timestamps {
            let row = self.design_row(timestamp);
            let yhat = dot(&row, &self.beta);
            if !yhat.is_finite() {
                return Err(ForecastError::NumericalError(format!(
                    "non-finite prediction at {}",
                    timestamp
                )));
            }
            let std_error = self.std_error(row[1]);
            let (lower, upper) = band(yhat, std_error, self.interval_width);
            points.push(ForecastPoint::new(
                timestamp,
                yhat * self.y_scale,
                lower * self.y_scale,
                upper * self.y_scale,
            ));
        }
        Ok(Forecast::new(points))
    }
}

fn seconds_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
