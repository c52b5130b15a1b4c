//! Anomaly detection error types.

use forecast_spi::ForecastError;
use table_spi::LoadError;
use thiserror::Error;

/// Errors that stop a detection run.
///
/// Per-group forecasting failures do not surface here; they are reported
/// through [`crate::ReportSink::group_failed`] and the run continues.
#[derive(Debug, Error)]
pub enum AnomalyError {
    #[error("Column not found: '{column}' (available: {})", available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    #[error("Cannot parse change point '{input}': expected YYYY-MM-DD HH:MM:SS")]
    ChangePointParse { input: String },

    #[error("Invalid threshold {value}: must be between 1 and 20")]
    InvalidThreshold { value: i64 },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

/// Result type for anomaly detection operations.
pub type Result<T> = std::result::Result<T, AnomalyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_not_found_display() {
        let error = AnomalyError::ColumnNotFound {
            column: "kpi".to_string(),
            available: vec!["time".to_string(), "value".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Column not found: 'kpi' (available: time, value)"
        );
    }

    #[test]
    fn test_change_point_parse_display() {
        let error = AnomalyError::ChangePointParse {
            input: "yesterday".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot parse change point 'yesterday': expected YYYY-MM-DD HH:MM:SS"
        );
    }

    #[test]
    fn test_invalid_threshold_display() {
        let error = AnomalyError::InvalidThreshold { value: 21 };
        assert_eq!(
            error.to_string(),
            "Invalid threshold 21: must be between 1 and 20"
        );
    }

    #[test]
    fn test_invalid_parameter_display() {
        let error = AnomalyError::InvalidParameter {
            name: "reducer".to_string(),
            reason: "unknown reducer 'max'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid parameter: reducer - unknown reducer 'max'"
        );
    }

    #[test]
    fn test_load_error_is_transparent() {
        let error: AnomalyError = LoadError::UnsupportedFormat("txt".to_string()).into();
        assert_eq!(
            error.to_string(),
            LoadError::UnsupportedFormat("txt".to_string()).to_string()
        );
        assert!(matches!(error, AnomalyError::Load(_)));
    }

    #[test]
    fn test_forecast_error_converts() {
        let error: AnomalyError = ForecastError::UnsupportedCountry("XX".to_string()).into();
        assert!(matches!(error, AnomalyError::Forecast(_)));
    }

    #[test]
    fn test_all_error_variants_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnomalyError>();
    }
}
