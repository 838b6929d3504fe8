use tracing::debug;

use crate::geometry::{Bezier, Contour};
use crate::math::Point2;

/// Result of a closest point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPointResult {
    /// The closest point on the contour.
    pub point: Point2,
    /// Index of the curve the point lies on.
    pub curve_index: usize,
    /// The parameter on that curve.
    pub parameter: f64,
    /// The distance from the query point to the closest point.
    pub distance: f64,
}

/// Tuning for [`ClosestPointOnContour`].
#[derive(Debug, Clone, Copy)]
pub struct ClosestPointParams {
    /// Lookup-table samples per curve for the coarse search.
    pub steps: usize,
    /// Refinement rounds before giving up on convergence.
    pub max_iterations: usize,
    /// Refinement stops once the sample spacing drops below this.
    pub min_step: f64,
}

impl Default for ClosestPointParams {
    fn default() -> Self {
        Self {
            steps: 100,
            max_iterations: 25,
            min_step: 0.001,
        }
    }
}

/// Finds the point on a contour nearest to a given point.
pub struct ClosestPointOnContour {
    point: Point2,
    params: ClosestPointParams,
}

impl ClosestPointOnContour {
    /// Creates a new `ClosestPointOnContour` query.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self {
            point,
            params: ClosestPointParams::default(),
        }
    }

    #[must_use]
    pub fn params(mut self, params: ClosestPointParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query.
    ///
    /// The nearest lookup-table sample picks a curve and a window around
    /// the sample, which is then narrowed by repeated sampling. A sample on
    /// a joint between two curves is refined on both.
    #[must_use]
    pub fn execute(&self, contour: &Contour) -> ClosestPointResult {
        let steps = self.params.steps.max(2);
        let lut = contour.lut(steps);
        let nearest = lut
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (*a - self.point)
                    .norm_squared()
                    .total_cmp(&(*b - self.point).norm_squared())
            })
            .map_or(0, |(i, _)| i);

        let (curve_index, local) = locate_sample(nearest, steps);
        let curves = contour.curves();
        let mut best = self.refine(&curves[curve_index], curve_index, local, steps);
        if local == steps - 1 {
            if let Some(next) = curves.get(curve_index + 1) {
                let candidate = self.refine(next, curve_index + 1, 0, steps);
                if candidate.distance < best.distance {
                    best = candidate;
                }
            }
        }
        best
    }

    /// Narrows `[t - dt, t + dt]` around sample `local` of `curve`.
    #[allow(clippy::cast_precision_loss)]
    fn refine(
        &self,
        curve: &Bezier,
        curve_index: usize,
        local: usize,
        steps: usize,
    ) -> ClosestPointResult {
        let dt = 1.0 / (steps - 1) as f64;
        let mut best_t = local as f64 * dt;
        let mut best_point = curve.evaluate(best_t);
        let mut best_distance = (best_point - self.point).norm();
        let mut lo = (best_t - dt).max(0.0);
        let mut hi = (best_t + dt).min(1.0);

        let mut converged = false;
        for _ in 0..self.params.max_iterations {
            let step = (hi - lo) / 4.0;
            if step < self.params.min_step {
                converged = true;
                break;
            }
            for k in 0..=4 {
                let t = step.mul_add(f64::from(k), lo);
                let p = curve.evaluate(t);
                let d = (p - self.point).norm();
                if d < best_distance {
                    best_t = t;
                    best_point = p;
                    best_distance = d;
                }
            }
            lo = (best_t - step).max(0.0);
            hi = (best_t + step).min(1.0);
        }
        if !converged {
            debug!(
                curve_index,
                t = best_t,
                "closest point refinement stopped at its iteration limit"
            );
        }

        ClosestPointResult {
            point: best_point,
            curve_index,
            parameter: best_t,
            distance: best_distance,
        }
    }
}

/// Maps an index into a contour lookup table back to `(curve, sample)`.
///
/// The first curve contributes `steps` samples; every later curve
/// contributes `steps - 1` because its first sample is the previous joint.
fn locate_sample(index: usize, steps: usize) -> (usize, usize) {
    if index < steps {
        return (0, index);
    }
    let rest = index - steps;
    (rest / (steps - 1) + 1, rest % (steps - 1) + 1)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::contour::tests::d_shape;
    use approx::assert_relative_eq;

    #[test]
    fn sample_index_mapping() {
        assert_eq!(locate_sample(0, 10), (0, 0));
        assert_eq!(locate_sample(9, 10), (0, 9));
        assert_eq!(locate_sample(10, 10), (1, 1));
        assert_eq!(locate_sample(18, 10), (1, 9));
        assert_eq!(locate_sample(19, 10), (2, 1));
    }

    #[test]
    fn mapping_agrees_with_lut() {
        let c = d_shape();
        let steps = 7;
        let lut = c.lut(steps);
        for (i, p) in lut.iter().enumerate() {
            let (curve, local) = locate_sample(i, steps);
            #[allow(clippy::cast_precision_loss)]
            let t = local as f64 / (steps - 1) as f64;
            assert_relative_eq!(*p, c.curves()[curve].evaluate(t), epsilon = 1e-9);
        }
    }

    #[test]
    fn point_on_straight_segment() {
        let c = d_shape();
        let r = c.find_closest_point(Point2::new(-10.0, 37.0), 50);
        assert_eq!(r.curve_index, 0);
        assert!((r.point.y - 37.0).abs() < 0.2, "{r:?}");
        assert!((r.distance - 10.0).abs() < 0.01, "{r:?}");
    }

    #[test]
    fn point_near_curved_segment() {
        let c = d_shape();
        let target = c.curves()[1].evaluate(0.37);
        let params = ClosestPointParams {
            min_step: 1e-9,
            ..ClosestPointParams::default()
        };
        let r = ClosestPointOnContour::new(target).params(params).execute(&c);
        assert_eq!(r.curve_index, 1);
        assert!(r.distance < 1e-4, "{r:?}");
        assert!((r.parameter - 0.37).abs() < 1e-5, "{r:?}");
    }

    #[test]
    fn joint_sample_checks_following_curve() {
        let c = d_shape();
        // Just right of the top joint: the closest point is on the bowl.
        let target = c.curves()[1].evaluate(0.004) + nalgebra::Vector2::new(0.0, 0.5);
        let r = c.find_closest_point(target, 10);
        assert_eq!(r.curve_index, 1);
        assert!(r.distance < 0.75, "{r:?}");
    }
}
