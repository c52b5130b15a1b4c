//! Chart payload for a flagged group.

use chrono::NaiveDateTime;
use forecast_spi::{ForecastPoint, Observation};
use serde::{Deserialize, Serialize};

use super::{FlaggedPoint, GroupKey};

/// Everything needed to draw one flagged group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupChart {
    pub group: GroupKey,
    /// Label of the value axis.
    pub kpi: String,
    pub change_point: NaiveDateTime,
    /// Forecast over history and horizon.
    pub forecast: Vec<ForecastPoint>,
    pub actual: Vec<Observation>,
    /// Anomalous points at or after the change point.
    pub anomalies: Vec<FlaggedPoint>,
}

impl GroupChart {
    pub fn anomaly_count(&self) -> usize {
        self.anomalies.len()
    }
}
