//! Forecast Core
//!
//! The default forecasting collaborator: an additive model of piecewise
//! linear trend, Fourier seasonality and holiday effects, fitted by
//! penalised least squares, plus the holiday calendars it consumes.

pub mod additive;
pub mod confidence;
pub mod holidays;
pub mod linalg;
pub mod seasonality;

// Re-export SPI traits for implementations
pub use forecast_spi::{
    FittedModel, Forecast, ForecastError, ForecastPoint, Forecaster, Frequency, Holiday,
    HolidayCalendar, ModelSpec, Observation, Result,
};

// Re-export main types
pub use additive::{AdditiveForecaster, AdditiveModel};
pub use holidays::{holiday_calendar, KoreanHolidays};
