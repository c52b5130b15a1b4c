//! Dense linear solver for small systems.

use forecast_spi::{ForecastError, Result};

/// Pivots smaller than this are treated as zero.
const PIVOT_EPSILON: f64 = 1e-12;

/// Solve `A x = b` for a row-major `n × n` matrix by Gauss-Jordan
/// elimination with partial pivoting.
pub fn solve(matrix: &[f64], rhs: &[f64], n: usize) -> Result<Vec<f64>> {
    if matrix.len() != n * n || rhs.len() != n {
        return Err(ForecastError::NumericalError(format!(
            "system shape mismatch: {} matrix entries and {} right-hand values for n = {}",
            matrix.len(),
            rhs.len(),
            n
        )));
    }

    let mut a = matrix.to_vec();
    let mut x = rhs.to_vec();

    for col in 0..n {
        // Find pivot
        let mut pivot_row = col;
        for row in (col + 1)..n {
            if a[row * n + col].abs() > a[pivot_row * n + col].abs() {
                pivot_row = row;
            }
        }

        let pivot = a[pivot_row * n + col];
        if !pivot.is_finite() || pivot.abs() < PIVOT_EPSILON {
            return Err(ForecastError::NumericalError(format!(
                "singular system at column {}",
                col
            )));
        }

        // Swap rows
        if pivot_row != col {
            for j in 0..n {
                a.swap(col * n + j, pivot_row * n + j);
            }
            x.swap(col, pivot_row);
        }

        // Scale row
        for j in 0..n {
            a[col * n + j] /= pivot;
        }
        x[col] /= pivot;

        // Eliminate column
        for row in 0..n {
            if row != col {
                let factor = a[row * n + col];
                if factor != 0.0 {
                    for j in 0..n {
                        a[row * n + j] -= factor * a[col * n + j];
                    }
                    x[row] -= factor * x[col];
                }
            }
        }
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_identity() {
        let x = solve(&[1.0, 0.0, 0.0, 1.0], &[3.0, -2.0], 2).unwrap();
        assert_eq!(x, vec![3.0, -2.0]);
    }

    #[test]
    fn test_solve_requires_pivoting() {
        // First pivot is zero without row exchange.
        let a = [0.0, 2.0, 1.0, 1.0];
        let x = solve(&a, &[4.0, 3.0], 2).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_solve_three_by_three() {
        let a = [2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0];
        let b = [8.0, -11.0, -3.0];
        let x = solve(&a, &b, 3).unwrap();
        let expected = [2.0, 3.0, -1.0];
        for (got, want) in x.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-9, "{} vs {}", got, want);
        }
    }

    #[test]
    fn test_solve_singular() {
        let result = solve(&[1.0, 2.0, 2.0, 4.0], &[1.0, 2.0], 2);
        assert!(matches!(result, Err(ForecastError::NumericalError(_))));
    }

    #[test]
    fn test_solve_shape_mismatch() {
        assert!(solve(&[1.0, 2.0, 3.0], &[1.0], 2).is_err());
    }
}
