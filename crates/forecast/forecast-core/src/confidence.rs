//! Uncertainty band helpers.

/// Standard normal quantile for probability `p` in (0, 1).
///
/// Rational approximation with a relative error below 1.2e-9.
pub fn normal_quantile(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}

/// Two-sided z multiplier for a band covering `interval_width` of the mass.
pub fn z_score(interval_width: f64) -> f64 {
    normal_quantile((1.0 + interval_width) / 2.0)
}

/// Band `yhat ± z · std_error`.
pub fn band(yhat: f64, std_error: f64, interval_width: f64) -> (f64, f64) {
    let half = z_score(interval_width) * std_error;
    (yhat - half, yhat + half)
}

/// Population standard deviation of residuals around their mean.
pub fn residual_std(residuals: &[f64]) -> f64 {
    if residuals.is_empty() {
        return 0.0;
    }
    let n = residuals.len() as f64;
    let mean = residuals.iter().sum::<f64>() / n;
    let variance = residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_score_common_levels() {
        assert!((z_score(0.80) - 1.281_551_565_5).abs() < 1e-6);
        assert!((z_score(0.95) - 1.959_963_984_5).abs() < 1e-6);
        assert!((z_score(0.99) - 2.575_829_303_5).abs() < 1e-6);
    }

    #[test]
    fn test_quantile_symmetry() {
        for p in [0.001, 0.01, 0.2, 0.4] {
            assert!((normal_quantile(p) + normal_quantile(1.0 - p)).abs() < 1e-8);
        }
        assert_eq!(normal_quantile(0.5), 0.0);
    }

    #[test]
    fn test_quantile_extremes() {
        assert_eq!(normal_quantile(0.0), f64::NEG_INFINITY);
        assert_eq!(normal_quantile(1.0), f64::INFINITY);
    }

    #[test]
    fn test_band_is_symmetric() {
        let (lower, upper) = band(100.0, 5.0, 0.95);
        assert!(lower < 100.0 && upper > 100.0);
        assert!(((100.0 - lower) - (upper - 100.0)).abs() < 1e-12);
    }

    #[test]
    fn test_residual_std() {
        let std = residual_std(&[-2.0, 1.0, -1.0, 2.0, 0.0]);
        assert!((std - 2.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(residual_std(&[]), 0.0);
    }
}
