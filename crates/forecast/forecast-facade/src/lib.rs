//! Forecast Facade
//!
//! Unified re-exports for forecasting:
//! - `Forecaster`, `FittedModel` and `HolidayCalendar` contracts from SPI
//! - `ForecastConfig` and its builder from API
//! - `AdditiveForecaster` and the holiday calendars from Core

// Re-export everything from SPI
pub use forecast_spi::*;

// Re-export configuration
pub use forecast_api::*;

// Re-export implementations and their helper modules
pub use forecast_core::*;
