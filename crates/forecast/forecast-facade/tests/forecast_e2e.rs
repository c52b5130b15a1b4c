//! End-to-end tests for the forecasting stack
//!
//! Tests the fit / make_future / predict workflow using only the facade.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use forecast_facade::{
    holiday_calendar, AdditiveForecaster, FittedModel, ForecastConfigBuilder, Forecaster,
    ModelSpec, Observation,
};

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn hourly_kpi(hours: usize) -> Vec<Observation> {
    (0..hours)
        .map(|h| {
            let daily = (2.0 * std::f64::consts::PI * h as f64 / 24.0).sin();
            Observation::new(start() + Duration::hours(h as i64), 50.0 + 0.1 * h as f64 + 5.0 * daily)
        })
        .collect()
}

#[test]
fn e2e_seasonal_fit_with_holidays_and_changepoint() {
    let config = ForecastConfigBuilder::new()
        .horizon(20)
        .holiday_years(vec![2025])
        .build()
        .unwrap();
    let calendar = holiday_calendar(&config.country).unwrap();
    let years = config.holiday_years.clone().unwrap();
    let forecaster = AdditiveForecaster::new(config.clone()).unwrap();

    let history = hourly_kpi(24 * 7);
    let spec = ModelSpec::default()
        .with_holidays(calendar.holidays(&years))
        .with_changepoint(start() + Duration::hours(120));

    let model = forecaster.fit(&history, &spec).unwrap();
    let future = model.make_future(config.horizon, config.frequency).unwrap();
    assert_eq!(future.len(), history.len() + 20);

    let forecast = model.predict(&future).unwrap();
    assert_eq!(forecast.len(), future.len());

    // In-sample fit tracks the daily cycle.
    let mut abs_error = 0.0;
    for obs in &history {
        let point = forecast.get(obs.timestamp).unwrap();
        abs_error += (point.yhat - obs.value).abs();
        assert!(point.lower <= point.yhat && point.yhat <= point.upper);
    }
    assert!(abs_error / (history.len() as f64) < 1.0);
}

#[test]
fn e2e_plain_fit_on_short_history() {
    let forecaster = AdditiveForecaster::default();
    let history = hourly_kpi(10);

    let model = forecaster.fit(&history, &ModelSpec::default()).unwrap();
    let future = model.make_future(20, Default::default()).unwrap();
    let forecast = model.predict(&future).unwrap();

    assert_eq!(forecast.len(), 30);
    assert_eq!(
        forecast.last_timestamp(),
        Some(start() + Duration::hours(29))
    );
}
