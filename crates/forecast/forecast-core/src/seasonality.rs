//! Fourier seasonal features.

use std::f64::consts::PI;

use chrono::NaiveDateTime;

/// Seconds in one day.
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Fractional days since the Unix epoch.
pub fn days_since_epoch(timestamp: NaiveDateTime) -> f64 {
    let ts = timestamp.and_utc();
    ts.timestamp() as f64 / SECONDS_PER_DAY
        + f64::from(ts.timestamp_subsec_nanos()) / (SECONDS_PER_DAY * 1e9)
}

/// A periodic component expressed as `order` sine/cosine pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct FourierSeasonality {
    pub name: &'static str,
    /// Period in days
    pub period: f64,
    pub order: usize,
}

impl FourierSeasonality {
    pub fn new(name: &'static str, period: f64, order: usize) -> Self {
        Self {
            name,
            period,
            order,
        }
    }

    /// One-day cycle.
    pub fn daily(order: usize) -> Self {
        Self::new("daily", 1.0, order)
    }

    /// Seven-day cycle.
    pub fn weekly(order: usize) -> Self {
        Self::new("weekly", 7.0, order)
    }

    /// Number of design columns this component contributes.
    pub fn width(&self) -> usize {
        2 * self.order
    }

    /// Append `sin, cos` for harmonics `1..=order` at time `day`.
    pub fn push_features(&self, day: f64, out: &mut Vec<f64>) {
        for k in 1..=self.order {
            let angle = 2.0 * PI * k as f64 * day / self.period;
            out.push(angle.sin());
            out.push(angle.cos());
        }
    }
}
