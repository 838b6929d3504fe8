use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::line_line_intersection;
use crate::math::Point2;

use super::{Bezier, Order};

/// The A-B-C construction of a quadratic or cubic curve at some `t`.
///
/// `b` is the curve point, `a` the hull point "above" it, and `c` the point
/// where the line through `a` and `b` meets the start-to-end chord. `c` and
/// `ratio = |BC| / |AB|` depend only on `t`, not on the control points.
#[derive(Debug, Clone, PartialEq)]
pub struct Abc {
    pub a: Point2,
    pub b: Point2,
    pub c: Point2,
    pub ratio: f64,
    pub hull: Vec<Point2>,
}

fn quadratic_ratio(t: f64) -> f64 {
    let top = 2.0 * t * t - 2.0 * t;
    (top / (top + 1.0)).abs()
}

fn cubic_ratio(t: f64) -> f64 {
    let mt = 1.0 - t;
    let bottom = t * t * t + mt * mt * mt;
    ((bottom - 1.0) / bottom).abs()
}

impl Bezier {
    /// A-B-C construction at `t`; `None` unless the curve is quadratic or
    /// cubic with a well-defined `c`.
    #[must_use]
    pub fn abc(&self, t: f64) -> Option<Abc> {
        let hull = self.hull(t);
        let (a, b, ratio) = match self.order() {
            Order::Quadratic => (self.points[1], hull[5], quadratic_ratio(t)),
            Order::Cubic => (hull[5], hull[9], cubic_ratio(t)),
            _ => return None,
        };
        let c = line_line_intersection(&a, &b, &self.start(), &self.end())?;
        Some(Abc {
            a,
            b,
            c,
            ratio,
            hull,
        })
    }

    /// Reshapes the curve so it passes through `point` at `t`, keeping both
    /// end points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] unless `0 < t < 1`,
    /// [`GeometryError::UnsupportedOrder`] for curves that are not quadratic
    /// or cubic, and [`GeometryError::Degenerate`] when the A-B-C
    /// construction does not exist.
    pub fn mold(&self, t: f64, point: Point2) -> Result<Bezier> {
        if t <= 0.0 || t >= 1.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        let order = self.order();
        if !matches!(order, Order::Quadratic | Order::Cubic) {
            return Err(GeometryError::UnsupportedOrder {
                operation: "mold",
                order: order.degree(),
            }
            .into());
        }
        let abc = self
            .abc(t)
            .ok_or_else(|| GeometryError::Degenerate("no A-B-C construction at t".into()))?;

        let a = point + (point - abc.c) / abc.ratio;
        let points = if order == Order::Quadratic {
            vec![self.start(), a, self.end()]
        } else {
            let shift = point - abc.b;
            let e1 = abc.hull[7] + shift;
            let e2 = abc.hull[8] + shift;
            let v1 = a - (a - e1) / (1.0 - t);
            let v2 = a + (e2 - a) / t;
            let start = self.start();
            let end = self.end();
            vec![
                start,
                start + (v1 - start) / t,
                end + (v2 - end) / (1.0 - t),
                end,
            ]
        };
        Ok(Self::with_domain(points, self.domain))
    }
}
