use std::f64::consts::FRAC_PI_3;

use crate::math::bounds_2d::BoundsRectangle;
use crate::math::roots::{accept_unit, derivative_roots};
use crate::math::transform_2d::Transform2D;
use crate::math::{angle, Point2, Vector2, TOLERANCE};

use super::gauss_legendre;
use super::{Bezier, Order};

/// Control points farther than this from the chord make a curve non-linear.
pub const LINEAR_TOLERANCE: f64 = 1e-4;

/// Vertical trend of a curve's control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Mixed,
    Flat,
    Up,
    Down,
}

/// Parameters in `[0, 1]` where a coordinate reaches a local extremum or
/// an inflection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extrema {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Union of `x` and `y`, sorted and deduplicated.
    pub values: Vec<f64>,
}

impl Bezier {
    /// Extremum parameters per axis.
    ///
    /// Roots of the first derivative, plus those of the second derivative
    /// for cubics.
    #[must_use]
    pub fn extrema(&self) -> &Extrema {
        self.derived.extrema.get_or_init(|| {
            let x = self.axis_extrema(|v| v.x);
            let y = self.axis_extrema(|v| v.y);
            let mut values: Vec<f64> = x.iter().chain(&y).copied().collect();
            sort_dedup(&mut values);
            Extrema { x, y, values }
        })
    }

    fn axis_extrema(&self, coord: fn(&Vector2) -> f64) -> Vec<f64> {
        let levels = if self.order() == Order::Cubic { 2 } else { 1 };
        let mut roots: Vec<f64> = self
            .hodographs()
            .iter()
            .take(levels)
            .flat_map(|level| {
                let values: Vec<f64> = level.iter().map(coord).collect();
                derivative_roots(&values)
            })
            .filter_map(accept_unit)
            .collect();
        sort_dedup(&mut roots);
        roots
    }

    /// Axis-aligned bounding box of the curve itself, not its control polygon.
    #[must_use]
    pub fn bounds(&self) -> BoundsRectangle {
        *self.derived.bounds.get_or_init(|| {
            let samples = [0.0, 1.0]
                .into_iter()
                .chain(self.extrema().values.iter().copied())
                .map(|t| self.evaluate(t));
            samples.fold(BoundsRectangle::empty(), |b, p| b.include_point(&p))
        })
    }

    /// Arc length by 24-point Gauss–Legendre quadrature of the speed.
    #[must_use]
    pub fn length(&self) -> f64 {
        *self
            .derived
            .length
            .get_or_init(|| gauss_legendre::integrate(|t| self.derivative(t).norm()))
    }

    /// Whether the curve is "simple": its end normals differ by less than
    /// 60 degrees and, for cubics, both inner control points lie on the same
    /// side of the chord.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        if self.order() == Order::Cubic {
            let p = &self.points;
            let a1 = angle(&p[0], &p[3], &p[1]);
            let a2 = angle(&p[0], &p[3], &p[2]);
            if (a1 > 0.0 && a2 < 0.0) || (a1 < 0.0 && a2 > 0.0) {
                return false;
            }
        }
        let (Some(n1), Some(n2)) = (self.normal(0.0), self.normal(1.0)) else {
            return false;
        };
        n1.dot(&n2).clamp(-1.0, 1.0).acos().abs() < FRAC_PI_3
    }

    /// Whether every control point lies on the start-to-end chord.
    #[must_use]
    pub fn is_linear(&self) -> bool {
        self.aligned_points(&[self.start(), self.end()])
            .iter()
            .all(|p| p.y.abs() <= LINEAR_TOLERANCE)
    }

    /// Whether the first control point after the start is turned positively
    /// from the chord.
    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        let second = self.points.get(1).copied().unwrap_or_else(|| self.start());
        angle(&self.start(), &self.end(), &second) > 0.0
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        *self.derived.direction.get_or_init(|| {
            let ys: Vec<f64> = self.points.iter().map(|p| p.y).collect();
            match self.order() {
                Order::Point => Direction::Flat,
                Order::Linear => {
                    if (ys[0] - ys[1]).abs() < TOLERANCE {
                        Direction::Flat
                    } else if ys[0] < ys[1] {
                        Direction::Up
                    } else {
                        Direction::Down
                    }
                }
                Order::Quadratic | Order::Cubic => {
                    if ys.windows(2).all(|w| w[0] <= w[1]) {
                        Direction::Up
                    } else if ys.windows(2).all(|w| w[0] >= w[1]) {
                        Direction::Down
                    } else {
                        Direction::Mixed
                    }
                }
                Order::General(_) => Direction::Mixed,
            }
        })
    }

    /// Control points expressed in the frame where `line` runs along the
    /// positive x-axis from the origin.
    #[must_use]
    pub fn aligned_points(&self, line: &[Point2; 2]) -> Vec<Point2> {
        let d = line[1] - line[0];
        let degrees = d.y.atan2(d.x).to_degrees();
        Transform2D::move_and_rotate(&line[0], &Point2::origin(), -degrees)
            .apply_to_segment(&self.points)
    }

    /// This curve in the frame of `line`; see [`aligned_points`](Self::aligned_points).
    #[must_use]
    pub fn align(&self, line: &[Point2; 2]) -> Self {
        Self::with_domain(self.aligned_points(line), self.domain)
    }

    /// Bounding box aligned with the start-to-end chord, as four edges.
    #[must_use]
    pub fn tight_bounds(&self) -> [[Point2; 2]; 4] {
        let chord = [self.start(), self.end()];
        let d = chord[1] - chord[0];
        let degrees = d.y.atan2(d.x).to_degrees();
        let local = self.align(&chord).bounds();
        let back = Transform2D::rotate_and_move(&Point2::origin(), &chord[0], degrees);
        local
            .contour()
            .map(|edge| edge.map(|p| back.apply_to_point(&p)))
    }
}

fn sort_dedup(values: &mut Vec<f64>) {
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| (*a - *b).abs() < TOLERANCE);
}
