//! Matrices for least-squares Bezier fitting in power-basis form.

use nalgebra::DMatrix;

use crate::error::FitError;
use crate::math::Point2;

/// How sample points are assigned curve parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Parametrization {
    /// Evenly spaced parameters.
    Uniform,
    /// Parameters proportional to distance along the sample polyline.
    #[default]
    Polygonal,
}

/// The binomial coefficient `n` choose `k`; zero when `k > n`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// The `n`x`n` matrix taking power-basis coefficients to Bezier control
/// points of degree `n - 1`, in its inverse form: `M[r][c]` is the
/// coefficient of `t^r` contributed by control point `c`.
///
/// It is lower triangular with `binomial(n - 1, i)` on the diagonal and
/// `M[r][c] = ±binomial(r, c) * M[r][r]` below it, negative when `r + c` is
/// odd.
#[must_use]
pub fn basis_matrix(n: usize) -> DMatrix<f64> {
    let k = n.saturating_sub(1);
    DMatrix::from_fn(n, n, |r, c| {
        if c > r {
            return 0.0;
        }
        let sign = if (r + c) % 2 == 0 { 1.0 } else { -1.0 };
        sign * binomial(r, c) * binomial(k, r)
    })
}

/// Curve parameters for each sample point.
///
/// # Errors
///
/// Returns [`FitError::TooFewPoints`] for fewer than two points and
/// [`FitError::DegenerateParametrization`] when polygonal parameters are
/// requested for points that all coincide.
#[allow(clippy::cast_precision_loss)]
pub fn time_values(
    points: &[Point2],
    parametrization: Parametrization,
) -> Result<Vec<f64>, FitError> {
    let n = points.len();
    if n < 2 {
        return Err(FitError::TooFewPoints { needed: 2, got: n });
    }
    match parametrization {
        Parametrization::Uniform => {
            let last = (n - 1) as f64;
            Ok((0..n).map(|i| i as f64 / last).collect())
        }
        Parametrization::Polygonal => {
            let mut distances = Vec::with_capacity(n);
            distances.push(0.0);
            let mut total = 0.0;
            for w in points.windows(2) {
                total += (w[1] - w[0]).norm();
                distances.push(total);
            }
            if total <= 0.0 {
                return Err(FitError::DegenerateParametrization);
            }
            Ok(distances.into_iter().map(|d| d / total).collect())
        }
    }
}

/// The `times.len()`x`columns` matrix with `T[r][c] = times[r]^c`.
#[must_use]
pub fn power_matrix(times: &[f64], columns: usize) -> DMatrix<f64> {
    DMatrix::from_fn(times.len(), columns, |r, c| {
        (0..c).fold(1.0, |acc, _| acc * times[r])
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn binomials() {
        assert!((binomial(0, 0) - 1.0).abs() < 1e-12);
        assert!((binomial(6, 3) - 20.0).abs() < 1e-12);
        assert!((binomial(10, 7) - 120.0).abs() < 1e-12);
        assert!(binomial(3, 5).abs() < 1e-12);
    }

    #[test]
    fn cubic_basis() {
        let expected = DMatrix::from_row_slice(
            4,
            4,
            &[
                1.0, 0.0, 0.0, 0.0, -3.0, 3.0, 0.0, 0.0, 3.0, -6.0, 3.0, 0.0, -1.0, 3.0, -3.0, 1.0,
            ],
        );
        assert_relative_eq!(basis_matrix(4), expected);
    }

    #[test]
    fn uniform_times() {
        let pts = [Point2::new(0.0, 0.0), Point2::new(5.0, 0.0), Point2::new(6.0, 0.0)];
        let t = time_values(&pts, Parametrization::Uniform).unwrap();
        assert_eq!(t, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn polygonal_times_follow_distance() {
        let pts = [Point2::new(0.0, 0.0), Point2::new(3.0, 4.0), Point2::new(3.0, 9.0)];
        let t = time_values(&pts, Parametrization::Polygonal).unwrap();
        assert_relative_eq!(t[1], 0.5);
        assert_relative_eq!(t[2], 1.0);
    }

    #[test]
    fn polygonal_times_reject_coincident_points() {
        let pts = [Point2::new(1.0, 1.0); 3];
        assert!(matches!(
            time_values(&pts, Parametrization::Polygonal),
            Err(FitError::DegenerateParametrization)
        ));
    }

    #[test]
    fn power_matrix_rows() {
        let t = power_matrix(&[0.0, 0.5, 1.0], 3);
        assert_relative_eq!(
            t,
            DMatrix::from_row_slice(3, 3, &[1.0, 0.0, 0.0, 1.0, 0.5, 0.25, 1.0, 1.0, 1.0])
        );
    }
}
