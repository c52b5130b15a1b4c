//! Forecast Service Provider Interface
//!
//! Defines the contract consumed from a forecasting collaborator: fitting a
//! model to a (timestamp, value) series, predicting a confidence band over
//! arbitrary timestamps, and generating a holiday calendar.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{FittedModel, Forecaster, HolidayCalendar};
pub use error::{ForecastError, Result};
pub use model::{Forecast, ForecastPoint, Frequency, Holiday, ModelSpec, Observation};
