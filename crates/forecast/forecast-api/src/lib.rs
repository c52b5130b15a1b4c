//! Forecast Consumer API
//!
//! Configuration types and builders for the forecasting collaborator.

// Re-export SPI types
pub use forecast_spi::{ForecastError, Frequency, Result};

use serde::{Deserialize, Serialize};

/// Largest accepted forecast horizon, in periods.
pub const MAX_HORIZON: usize = 10_000;

/// Settings shared by every per-group fit in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of periods to extrapolate past the last observation (default: 20).
    pub horizon: usize,
    /// Step between extrapolated periods (default: hourly).
    pub frequency: Frequency,
    /// Coverage of the uncertainty band (default: 0.80).
    pub interval_width: f64,
    /// Fit a daily seasonal component.
    pub daily_seasonality: bool,
    /// Fourier order of the daily component.
    pub daily_fourier_order: usize,
    /// Fit a weekly seasonal component.
    pub weekly_seasonality: bool,
    /// Fourier order of the weekly component.
    pub weekly_fourier_order: usize,
    /// Maximum number of automatically placed changepoints.
    pub n_changepoints: usize,
    /// Fraction of the history in which automatic changepoints are placed.
    pub changepoint_range: f64,
    /// Prior scale of changepoint rate adjustments.
    pub changepoint_prior_scale: f64,
    /// Prior scale of seasonal coefficients.
    pub seasonality_prior_scale: f64,
    /// Prior scale of holiday effects.
    pub holidays_prior_scale: f64,
    /// Holiday calendar country code.
    pub country: String,
    /// Years to generate holidays for; derived from the data when unset.
    pub holiday_years: Option<Vec<i32>>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: 20,
            frequency: Frequency::Hour,
            interval_width: 0.80,
            daily_seasonality: true,
            daily_fourier_order: 4,
            weekly_seasonality: true,
            weekly_fourier_order: 3,
            n_changepoints: 25,
            changepoint_range: 0.8,
            changepoint_prior_scale: 0.05,
            seasonality_prior_scale: 10.0,
            holidays_prior_scale: 10.0,
            country: "KR".to_string(),
            holiday_years: None,
        }
    }
}

impl ForecastConfig {
    /// Check that every setting is in range.
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(invalid("horizon", "must be at least 1"));
        }
        if self.horizon > MAX_HORIZON {
            return Err(ForecastError::InvalidParameter {
                name: "horizon".to_string(),
                reason: format!("must be at most {}", MAX_HORIZON),
            });
        }
        if !(self.interval_width > 0.0 && self.interval_width < 1.0) {
            return Err(invalid("interval_width", "must be in (0, 1)"));
        }
        if !(self.changepoint_range > 0.0 && self.changepoint_range <= 1.0) {
            return Err(invalid("changepoint_range", "must be in (0, 1]"));
        }
        for (name, scale) in [
            ("changepoint_prior_scale", self.changepoint_prior_scale),
            ("seasonality_prior_scale", self.seasonality_prior_scale),
            ("holidays_prior_scale", self.holidays_prior_scale),
        ] {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(invalid(name, "must be positive"));
            }
        }
        if self.country.trim().is_empty() {
            return Err(invalid("country", "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(name: &str, reason: &str) -> ForecastError {
    ForecastError::InvalidParameter {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// Builder for [`ForecastConfig`].
#[derive(Debug, Default)]
pub struct ForecastConfigBuilder {
    config: ForecastConfig,
}

impl ForecastConfigBuilder {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extrapolation horizon.
    pub fn horizon(mut self, horizon: usize) -> Self {
        self.config.horizon = horizon;
        self
    }

    /// Set the extrapolation frequency.
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.config.frequency = frequency;
        self
    }

    /// Set the band coverage.
    pub fn interval_width(mut self, width: f64) -> Self {
        self.config.interval_width = width;
        self
    }

    /// Toggle seasonal components.
    pub fn seasonality(mut self, daily: bool, weekly: bool) -> Self {
        self.config.daily_seasonality = daily;
        self.config.weekly_seasonality = weekly;
        self
    }

    /// Set the automatic changepoint budget.
    pub fn n_changepoints(mut self, n: usize) -> Self {
        self.config.n_changepoints = n;
        self
    }

    /// Set the changepoint prior scale.
    pub fn changepoint_prior_scale(mut self, scale: f64) -> Self {
        self.config.changepoint_prior_scale = scale;
        self
    }

    /// Set the holiday country.
    pub fn country(mut self, country: &str) -> Self {
        self.config.country = country.to_string();
        self
    }

    /// Pin the holiday years.
    pub fn holiday_years(mut self, years: Vec<i32>) -> Self {
        self.config.holiday_years = Some(years);
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<ForecastConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ForecastConfig::default();
        assert_eq!(config.horizon, 20);
        assert_eq!(config.frequency, Frequency::Hour);
        assert_eq!(config.interval_width, 0.80);
        assert!(config.daily_seasonality);
        assert!(config.weekly_seasonality);
        assert_eq!(config.country, "KR");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ForecastConfigBuilder::new()
            .horizon(48)
            .frequency(Frequency::Day)
            .interval_width(0.95)
            .holiday_years(vec![2025])
            .build()
            .unwrap();

        assert_eq!(config.horizon, 48);
        assert_eq!(config.frequency, Frequency::Day);
        assert_eq!(config.interval_width, 0.95);
        assert_eq!(config.holiday_years, Some(vec![2025]));
    }

    #[test]
    fn test_rejects_zero_horizon() {
        let result = ForecastConfigBuilder::new().horizon(0).build();
        assert!(matches!(
            result,
            Err(ForecastError::InvalidParameter { name, .. }) if name == "horizon"
        ));
    }

    #[test]
    fn test_rejects_oversized_horizon() {
        assert!(ForecastConfigBuilder::new().horizon(MAX_HORIZON).build().is_ok());

        let config = ForecastConfig {
            horizon: 100_000_000,
            frequency: Frequency::Week,
            ..ForecastConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ForecastError::InvalidParameter { name, .. }) if name == "horizon"
        ));
    }

    #[test]
    fn test_rejects_interval_width_out_of_range() {
        assert!(ForecastConfigBuilder::new().interval_width(1.0).build().is_err());
        assert!(ForecastConfigBuilder::new().interval_width(0.0).build().is_err());
    }

    #[test]
    fn test_rejects_non_positive_prior() {
        let result = ForecastConfigBuilder::new().changepoint_prior_scale(0.0).build();
        assert!(matches!(
            result,
            Err(ForecastError::InvalidParameter { name, .. }) if name == "changepoint_prior_scale"
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ForecastConfig =
            serde_json::from_str(r#"{ "horizon": 12, "frequency": "day" }"#).unwrap();
        assert_eq!(config.horizon, 12);
        assert_eq!(config.frequency, Frequency::Day);
        assert_eq!(config.n_changepoints, 25);
    }
}
