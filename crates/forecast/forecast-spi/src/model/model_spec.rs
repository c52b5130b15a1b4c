//! Per-fit model specification

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Holiday;

/// Components to include when fitting one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Include a daily seasonal component
    pub daily_seasonality: bool,
    /// Include a weekly seasonal component
    pub weekly_seasonality: bool,
    /// Explicit trend changepoints; empty means automatic placement
    pub changepoints: Vec<NaiveDateTime>,
    /// Holiday calendar used as exogenous indicators
    pub holidays: Vec<Holiday>,
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self {
            daily_seasonality: true,
            weekly_seasonality: true,
            changepoints: Vec::new(),
            holidays: Vec::new(),
        }
    }
}

impl ModelSpec {
    /// Add an explicit changepoint.
    pub fn with_changepoint(mut self, changepoint: NaiveDateTime) -> Self {
        self.changepoints.push(changepoint);
        self
    }

    /// Attach a holiday calendar.
    pub fn with_holidays(mut self, holidays: Vec<Holiday>) -> Self {
        self.holidays = holidays;
        self
    }

    /// Toggle the seasonal components.
    pub fn with_seasonality(mut self, daily: bool, weekly: bool) -> Self {
        self.daily_seasonality = daily;
        self.weekly_seasonality = weekly;
        self
    }
}
