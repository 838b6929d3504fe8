use crate::error::Result;
use crate::math::{Point2, Vector2};

/// Parameter domain for a curve.
///
/// For a [`Bezier`](super::Bezier) produced by splitting, this is the
/// sub-range of the root curve's `[0, 1]` parameter space it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl Default for CurveDomain {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Maps a local parameter in `[0, 1]` into this domain.
    #[must_use]
    pub fn map(&self, t: f64) -> f64 {
        (self.t_max - self.t_min).mul_add(t, self.t_min)
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.t_min.midpoint(self.t_max)
    }

    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        (self.t_min..=self.t_max).contains(&t)
    }
}

/// Trait for parametric curves in the plane.
pub trait Curve {
    /// Evaluates the curve at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter lies outside [`domain`](Curve::domain).
    fn evaluate(&self, t: f64) -> Result<Point2>;

    /// Computes the unit tangent at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or the tangent is degenerate.
    fn tangent(&self, t: f64) -> Result<Vector2>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve ends where it starts.
    fn is_closed(&self) -> bool;
}
