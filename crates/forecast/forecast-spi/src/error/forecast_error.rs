//! Forecast error types

use thiserror::Error;

/// Errors that can occur while fitting or predicting
#[derive(Error, Debug, Clone)]
pub enum ForecastError {
    /// Insufficient data points for the operation
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Timestamps cannot be used for fitting
    #[error("Invalid timestamps: {0}")]
    InvalidTimestamps(String),

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// No holiday calendar for this country
    #[error("Unsupported holiday country: {0}")]
    UnsupportedCountry(String),
}

/// Result type alias for forecast operations
pub type Result<T> = std::result::Result<T, ForecastError>;
