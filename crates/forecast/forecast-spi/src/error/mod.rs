//! Error module containing error types for forecast operations

mod forecast_error;

pub use forecast_error::{ForecastError, Result};
