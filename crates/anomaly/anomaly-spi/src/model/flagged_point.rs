//! Observed points joined with their forecast band.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One observed point with the forecast at its exact timestamp, if any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlaggedPoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
    pub yhat: Option<f64>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    /// Value strictly outside a present band.
    pub anomalous: bool,
}
