//! Anomaly Detection API
//!
//! Configuration types and builders for anomaly detection.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use anomaly_spi::{AnomalyError, Result};
pub use forecast_api::ForecastConfig;

// ============================================================================
// Aggregation
// ============================================================================

/// Column-name fragments that mark a base-station level grouping column.
pub const COARSE_ELEMENT_TOKENS: &[&str] = &["MRBTS", "LNBTS", "NRBTS"];

/// Whether rows must be aggregated per (group, time) before detection.
pub fn needs_aggregation(group_column: &str) -> bool {
    let upper = group_column.trim().to_ascii_uppercase();
    COARSE_ELEMENT_TOKENS
        .iter()
        .any(|token| upper.contains(token))
}

/// How KPI values sharing a (group, time) pair are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reducer {
    #[default]
    Sum,
    Mean,
    Median,
}

impl Reducer {
    /// Reduce the non-null values of one bucket.
    ///
    /// `Sum` of nothing is `0.0`; `Mean` and `Median` of nothing are `None`.
    pub fn apply(&self, values: &[f64]) -> Option<f64> {
        match self {
            Reducer::Sum => Some(values.iter().sum()),
            Reducer::Mean => {
                if values.is_empty() {
                    None
                } else {
                    Some(values.iter().sum::<f64>() / values.len() as f64)
                }
            }
            Reducer::Median => {
                if values.is_empty() {
                    return None;
                }
                let mut sorted = values.to_vec();
                sorted.sort_by(f64::total_cmp);
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    Some((sorted[mid - 1] + sorted[mid]) / 2.0)
                } else {
                    Some(sorted[mid])
                }
            }
        }
    }
}

impl fmt::Display for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Reducer::Sum => "sum",
            Reducer::Mean => "mean",
            Reducer::Median => "median",
        };
        f.write_str(s)
    }
}

impl FromStr for Reducer {
    type Err = AnomalyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Reducer::Sum),
            "mean" => Ok(Reducer::Mean),
            "median" => Ok(Reducer::Median),
            other => Err(AnomalyError::InvalidParameter {
                name: "reducer".to_string(),
                reason: format!("unknown reducer '{}'", other),
            }),
        }
    }
}

// ============================================================================
// Detection Configuration
// ============================================================================

/// Change point used when none is given.
pub const DEFAULT_CHANGE_POINT: &str = "2025-05-06 12:00:00";

/// Default minimum post-change-point anomaly count.
pub const DEFAULT_THRESHOLD: usize = 3;

/// Accepted threshold range.
pub const THRESHOLD_RANGE: std::ops::RangeInclusive<i64> = 1..=20;

/// Parse a change point with the shared timestamp parser.
pub fn parse_change_point(input: &str) -> Result<NaiveDateTime> {
    table_spi::parse_timestamp(input).ok_or_else(|| AnomalyError::ChangePointParse {
        input: input.to_string(),
    })
}

fn default_change_point() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 6)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap_or_default()
}

fn validate_threshold(value: i64) -> Result<usize> {
    if THRESHOLD_RANGE.contains(&value) {
        Ok(value as usize)
    } else {
        Err(AnomalyError::InvalidThreshold { value })
    }
}

mod change_point_format {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format("%Y-%m-%d %H:%M:%S").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_change_point(&raw).map_err(de::Error::custom)
    }
}

/// Column selection and flagging rules for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Grouping column.
    pub group_column: String,
    /// Time column; the first column when unset.
    pub time_column: Option<String>,
    /// KPI column; the second column when unset.
    pub kpi_column: Option<String>,
    /// Reducer for coarse-element grouping columns (default: sum).
    pub reducer: Option<Reducer>,
    /// Anomalies are counted at or after this timestamp.
    #[serde(with = "change_point_format")]
    pub change_point: NaiveDateTime,
    /// Minimum anomaly count for a group to be reported, 1 to 20.
    pub threshold: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            group_column: String::new(),
            time_column: None,
            kpi_column: None,
            reducer: None,
            change_point: default_change_point(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl DetectionConfig {
    /// Check the threshold range and that a grouping column is named.
    pub fn validate(&self) -> Result<()> {
        validate_threshold(i64::try_from(self.threshold).unwrap_or(i64::MAX))?;
        if self.group_column.trim().is_empty() {
            return Err(AnomalyError::InvalidParameter {
                name: "group_column".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Reducer to aggregate with, or `None` when the grouping column is
    /// not a coarse element.
    pub fn effective_reducer(&self) -> Option<Reducer> {
        if needs_aggregation(&self.group_column) {
            Some(self.reducer.unwrap_or_default())
        } else {
            None
        }
    }
}

/// Builder for [`DetectionConfig`].
#[derive(Debug)]
pub struct DetectionConfigBuilder {
    config: DetectionConfig,
    threshold: i64,
}

impl DetectionConfigBuilder {
    /// Start from the defaults with the given grouping column.
    pub fn new(group_column: &str) -> Self {
        Self {
            config: DetectionConfig {
                group_column: group_column.to_string(),
                ..DetectionConfig::default()
            },
            threshold: DEFAULT_THRESHOLD as i64,
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: DetectionConfig) -> Self {
        let threshold = i64::try_from(config.threshold).unwrap_or(i64::MAX);
        Self { config, threshold }
    }

    pub fn group_column(mut self, column: &str) -> Self {
        self.config.group_column = column.to_string();
        self
    }

    pub fn time_column(mut self, column: &str) -> Self {
        self.config.time_column = Some(column.to_string());
        self
    }

    pub fn kpi_column(mut self, column: &str) -> Self {
        self.config.kpi_column = Some(column.to_string());
        self
    }

    pub fn reducer(mut self, reducer: Reducer) -> Self {
        self.config.reducer = Some(reducer);
        self
    }

    pub fn change_point(mut self, change_point: NaiveDateTime) -> Self {
        self.config.change_point = change_point;
        self
    }

    /// Parse and set the change point.
    pub fn change_point_str(self, input: &str) -> Result<Self> {
        let change_point = parse_change_point(input)?;
        Ok(self.change_point(change_point))
    }

    pub fn threshold(mut self, threshold: i64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Validate and build the configuration.
    pub fn build(mut self) -> Result<DetectionConfig> {
        self.config.threshold = validate_threshold(self.threshold)?;
        self.config.validate()?;
        Ok(self.config)
    }
}

// ============================================================================
// Run Configuration
// ============================================================================

/// Contents of a `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub forecast: ForecastConfig,
    pub detection: DetectionConfig,
}
