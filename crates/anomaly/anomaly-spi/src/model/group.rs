//! Group identity and per-group series.

use std::fmt;

use chrono::NaiveDateTime;
use forecast_spi::Observation;
use serde::{Deserialize, Serialize};

/// A distinct value of the grouping column, as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for GroupKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// The valid (time, value) pairs of one group, ordered by time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSeries {
    pub key: GroupKey,
    pub observations: Vec<Observation>,
}

impl GroupSeries {
    /// Build a series; observations are sorted by timestamp (stable).
    pub fn new(key: GroupKey, mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|o| o.timestamp);
        Self { key, observations }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Whether some observation carries exactly `timestamp`.
    pub fn contains_timestamp(&self, timestamp: NaiveDateTime) -> bool {
        self.observations
            .binary_search_by_key(&timestamp, |o| o.timestamp)
            .is_ok()
    }
}
