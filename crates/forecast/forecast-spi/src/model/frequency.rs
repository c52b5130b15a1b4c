//! Sampling frequency for future timestamps

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// Step between consecutive forecast timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Minute,
    #[default]
    Hour,
    Day,
    Week,
}

impl Frequency {
    /// Length of one step.
    pub fn step(&self) -> Duration {
        match self {
            Frequency::Minute => Duration::minutes(1),
            Frequency::Hour => Duration::hours(1),
            Frequency::Day => Duration::days(1),
            Frequency::Week => Duration::weeks(1),
        }
    }

    /// The timestamp `periods` steps after `from`.
    ///
    /// Fails when the offset or the result leaves the representable range.
    pub fn advance(
        &self,
        from: NaiveDateTime,
        periods: usize,
    ) -> Result<NaiveDateTime, ForecastError> {
        i32::try_from(periods)
            .ok()
            .and_then(|n| self.step().checked_mul(n))
            .and_then(|offset| from.checked_add_signed(offset))
            .ok_or_else(|| {
                ForecastError::InvalidTimestamps(format!(
                    "{} {} step(s) after {} is out of range",
                    periods, self, from
                ))
            })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::Minute => "minute",
            Frequency::Hour => "hour",
            Frequency::Day => "day",
            Frequency::Week => "week",
        };
        f.write_str(s)
    }
}

impl FromStr for Frequency {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minute" | "min" | "t" => Ok(Frequency::Minute),
            "hour" | "hourly" | "h" => Ok(Frequency::Hour),
            "day" | "daily" | "d" => Ok(Frequency::Day),
            "week" | "weekly" | "w" => Ok(Frequency::Week),
            other => Err(ForecastError::InvalidParameter {
                name: "frequency".to_string(),
                reason: format!("unknown frequency '{}'", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_hourly() {
        assert_eq!(Frequency::default(), Frequency::Hour);
        assert_eq!(Frequency::Hour.step(), Duration::hours(1));
    }

    #[test]
    fn test_advance() {
        let start = chrono::NaiveDate::from_ymd_opt(2025, 5, 6)
            .unwrap()
            .and_hms_opt(22, 0, 0)
            .unwrap();
        assert_eq!(Frequency::Hour.advance(start, 3).unwrap(), start + Duration::hours(3));
        assert_eq!(Frequency::Week.advance(start, 0).unwrap(), start);
    }

    #[test]
    fn test_advance_out_of_range() {
        let start = chrono::NaiveDate::from_ymd_opt(2025, 5, 6)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(matches!(
            Frequency::Week.advance(start, 100_000_000),
            Err(ForecastError::InvalidTimestamps(_))
        ));
        assert!(Frequency::Minute.advance(start, usize::MAX).is_err());
        assert!(Frequency::Hour.advance(NaiveDateTime::MAX, 1).is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("H".parse::<Frequency>().unwrap(), Frequency::Hour);
        assert_eq!("daily".parse::<Frequency>().unwrap(), Frequency::Day);
        assert!("fortnight".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for freq in [Frequency::Minute, Frequency::Hour, Frequency::Day, Frequency::Week] {
            assert_eq!(freq.to_string().parse::<Frequency>().unwrap(), freq);
        }
    }
}
