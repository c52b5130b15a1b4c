//! Forecast-band flagging.

use anomaly_spi::FlaggedPoint;
use chrono::NaiveDateTime;
use forecast_spi::{Forecast, Observation};

/// A value is anomalous only when both bounds exist and it lies strictly
/// outside them.
pub fn is_anomalous(value: f64, lower: Option<f64>, upper: Option<f64>) -> bool {
    match (lower, upper) {
        (Some(lower), Some(upper)) => value > upper || value < lower,
        _ => false,
    }
}

/// Left-join observations onto the forecast by exact timestamp and flag
/// each point.
pub fn flag_points(observations: &[Observation], forecast: &Forecast) -> Vec<FlaggedPoint> {
    observations
        .iter()
        .map(|obs| {
            let point = forecast.get(obs.timestamp);
            let yhat = point.map(|p| p.yhat);
            let lower = point.map(|p| p.lower);
            let upper = point.map(|p| p.upper);
            FlaggedPoint {
                timestamp: obs.timestamp,
                value: obs.value,
                yhat,
                lower,
                upper,
                anomalous: is_anomalous(obs.value, lower, upper),
            }
        })
        .collect()
}

/// Anomalous points at or after `change_point`.
pub fn count_from(points: &[FlaggedPoint], change_point: NaiveDateTime) -> usize {
    points
        .iter()
        .filter(|p| p.anomalous && p.timestamp >= change_point)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use forecast_spi::ForecastPoint;

    fn at(hour: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 6)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::hours(hour)
    }

    #[test]
    fn test_boundary_values_are_not_anomalous() {
        assert!(!is_anomalous(10.0, Some(10.0), Some(20.0)));
        assert!(!is_anomalous(20.0, Some(10.0), Some(20.0)));
        assert!(!is_anomalous(15.0, Some(10.0), Some(20.0)));
    }

    #[test]
    fn test_strictly_outside_is_anomalous() {
        assert!(is_anomalous(20.000001, Some(10.0), Some(20.0)));
        assert!(is_anomalous(9.999999, Some(10.0), Some(20.0)));
    }

    #[test]
    fn test_missing_bounds_never_anomalous() {
        assert!(!is_anomalous(1e9, None, None));
        assert!(!is_anomalous(1e9, Some(0.0), None));
        assert!(!is_anomalous(-1e9, None, Some(0.0)));
    }

    #[test]
    fn test_flag_points_joins_exact_timestamps() {
        let forecast = Forecast::new(vec![
            ForecastPoint::new(at(0), 5.0, 4.0, 6.0),
            ForecastPoint::new(at(1), 5.0, 4.0, 6.0),
        ]);
        let observations = vec![
            Observation::new(at(0), 7.0),
            Observation::new(at(1), 6.0),
            Observation::new(at(1) + Duration::minutes(30), 100.0),
        ];

        let points = flag_points(&observations, &forecast);
        assert!(points[0].anomalous);
        assert!(!points[1].anomalous);
        assert_eq!(points[2].upper, None);
        assert!(!points[2].anomalous);
    }

    #[test]
    fn test_count_from_is_inclusive() {
        let forecast = Forecast::new(
            (0..4)
                .map(|h| ForecastPoint::new(at(h), 0.0, -1.0, 1.0))
                .collect(),
        );
        let observations: Vec<_> = (0..4).map(|h| Observation::new(at(h), 5.0)).collect();
        let points = flag_points(&observations, &forecast);

        assert_eq!(count_from(&points, at(2)), 2);
        assert_eq!(count_from(&points, at(0)), 4);
        assert_eq!(count_from(&points, at(9)), 0);
    }
}
