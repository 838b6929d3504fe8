use nalgebra::DMatrix;
use tracing::debug;

use crate::error::{FitError, Result};
use crate::geometry::Bezier;
use crate::math::matrix::invert;
use crate::math::Point2;

use super::basis::{basis_matrix, power_matrix, time_values, Parametrization};

/// Output of [`CurveFit`].
#[derive(Debug, Clone)]
pub struct FitResult {
    /// The fitted curve.
    pub curve: Bezier,
    /// The basis matrix used for the fit.
    pub basis: DMatrix<f64>,
    /// The parameter assigned to each sample point.
    pub times: Vec<f64>,
}

/// Least-squares fit of a Bezier curve to sample points.
pub struct CurveFit<'a> {
    points: &'a [Point2],
    order: Option<usize>,
    parametrization: Parametrization,
}

impl<'a> CurveFit<'a> {
    /// Creates a new `CurveFit` operation.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self {
            points,
            order: None,
            parametrization: Parametrization::default(),
        }
    }

    /// Degree of the fitted curve. Defaults to one less than the number of
    /// points, which interpolates them.
    #[must_use]
    pub fn order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub fn parametrization(mut self, parametrization: Parametrization) -> Self {
        self.parametrization = parametrization;
        self
    }

    /// Executes the fit.
    ///
    /// With `T` the power matrix of the sample parameters, `M` the basis
    /// matrix and `P` the samples, the control points are
    /// `M⁻¹ (TᵀT)⁻¹ Tᵀ P`.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::TooFewPoints`] when there are fewer than two
    /// samples or fewer samples than control points,
    /// [`FitError::DegenerateParametrization`] for coincident samples, and
    /// [`FitError::Singular`] when the normal equations cannot be solved.
    pub fn execute(&self) -> Result<FitResult> {
        let n = self.points.len();
        let columns = self.order.unwrap_or(n.saturating_sub(1)) + 1;
        if n < 2 || columns > n {
            return Err(FitError::TooFewPoints {
                needed: columns.max(2),
                got: n,
            }
            .into());
        }

        let times = time_values(self.points, self.parametrization)?;
        let t = power_matrix(&times, columns);
        let basis = basis_matrix(columns);
        let samples = DMatrix::from_fn(n, 2, |r, c| self.points[r][c]);

        let tt = t.transpose();
        let normal = invert(&(&tt * &t))?;
        let basis_inverse = invert(&basis)?;
        let control = basis_inverse * normal * tt * samples;

        let points = control
            .row_iter()
            .map(|row| Point2::new(row[0], row[1]))
            .collect::<Vec<_>>();
        debug!(samples = n, degree = columns - 1, "fitted curve");

        Ok(FitResult {
            curve: Bezier::new(points)?,
            basis,
            times,
        })
    }
}
