//! Forecast model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Prediction for one timestamp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: NaiveDateTime,
    /// Point estimate
    pub yhat: f64,
    /// Lower bound of the uncertainty band
    pub lower: f64,
    /// Upper bound of the uncertainty band
    pub upper: f64,
}

impl ForecastPoint {
    pub fn new(timestamp: NaiveDateTime, yhat: f64, lower: f64, upper: f64) -> Self {
        Self {
            timestamp,
            yhat,
            lower,
            upper,
        }
    }
}

/// Predictions ordered by timestamp
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    points: Vec<ForecastPoint>,
}

impl Forecast {
    /// Build a forecast; points are sorted by timestamp.
    pub fn new(mut points: Vec<ForecastPoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { points }
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at exactly `timestamp`, if predicted.
    pub fn get(&self, timestamp: NaiveDateTime) -> Option<&ForecastPoint> {
        self.points
            .binary_search_by_key(&timestamp, |p| p.timestamp)
            .ok()
            .map(|idx| &self.points[idx])
    }

    /// Last predicted timestamp.
    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.points.last().map(|p| p.timestamp)
    }
}
