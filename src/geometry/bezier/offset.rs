use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::line_line_intersection;
use crate::math::{Point2, Vector2};

use super::{Bezier, Order};

/// How far to move a curve along its normals.
#[derive(Clone, Copy)]
pub enum Distance<'a> {
    /// The same distance everywhere.
    Constant(f64),
    /// A distance that varies with the curve parameter.
    Varying(&'a dyn Fn(f64) -> f64),
}

impl Distance<'_> {
    /// Distance at local parameter `t`.
    #[must_use]
    pub fn at(&self, t: f64) -> f64 {
        match self {
            Self::Constant(d) => *d,
            Self::Varying(f) => f(t),
        }
    }
}

impl From<f64> for Distance<'_> {
    fn from(d: f64) -> Self {
        Self::Constant(d)
    }
}

impl<'a, F: Fn(f64) -> f64> From<&'a F> for Distance<'a> {
    fn from(f: &'a F) -> Self {
        Self::Varying(f)
    }
}

/// A point on a curve together with its normal and the point displaced
/// along that normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalOffset {
    pub point: Point2,
    pub normal: Vector2,
    pub offset: Point2,
}

impl Bezier {
    /// The curve point at `t` moved `distance` along the normal.
    ///
    /// Returns `None` where the normal is undefined.
    #[must_use]
    pub fn offset_at(&self, t: f64, distance: f64) -> Option<NormalOffset> {
        let normal = self.normal(t)?;
        let point = self.evaluate(t);
        Some(NormalOffset {
            point,
            normal,
            offset: point + normal * distance,
        })
    }

    /// Offset curve: a sequence of curves approximating this curve moved
    /// along its normals.
    ///
    /// Linear curves are translated. Anything else is reduced into simple
    /// pieces first, and each piece is scaled.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Irreducible`] when the curve cannot be
    /// reduced, and the errors of [`scale`](Self::scale) for each piece.
    pub fn offset<'d>(&self, distance: impl Into<Distance<'d>>) -> Result<Vec<Bezier>> {
        let distance = distance.into();
        if self.is_linear() {
            return Ok(vec![self.translated(distance)?]);
        }
        let reduced = self.reduce();
        if reduced.is_empty() {
            return Err(GeometryError::Irreducible.into());
        }
        reduced
            .iter()
            .map(|piece| {
                if piece.is_linear() {
                    piece.translated(distance)
                } else {
                    piece.scale(distance)
                }
            })
            .collect()
    }

    /// Moves a simple curve along its normals.
    ///
    /// End points move exactly by the distance. With a constant distance the
    /// inner control points are placed so the end tangents are preserved;
    /// with a varying distance they are pushed away from the scaling origin.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnsupportedOrder`] above cubic order and
    /// [`GeometryError::Degenerate`] when an end normal is undefined or the
    /// end normals are parallel (reduce the curve first).
    pub fn scale<'d>(&self, distance: impl Into<Distance<'d>>) -> Result<Bezier> {
        let distance = distance.into();
        let order = self.order();
        match order {
            Order::Point => {
                return Err(GeometryError::Degenerate("cannot scale a single point".into()).into())
            }
            Order::Linear => return self.translated(distance),
            Order::Quadratic if matches!(distance, Distance::Varying(_)) => {
                return self.raise_order().scale(distance);
            }
            Order::General(n) => {
                return Err(GeometryError::UnsupportedOrder {
                    operation: "scale",
                    order: n,
                }
                .into())
            }
            Order::Quadratic | Order::Cubic => {}
        }

        let n = order.degree();
        let normals = [self.end_normal(0.0)?, self.end_normal(1.0)?];
        let ends = [self.start(), self.end()];
        let origin = line_line_intersection(
            &ends[0],
            &(ends[0] + normals[0]),
            &ends[1],
            &(ends[1] + normals[1]),
        )
        .ok_or_else(|| {
            GeometryError::Degenerate("cannot scale this curve; reduce it first".into())
        })?;

        let mut points = self.points.clone();
        points[0] = ends[0] + normals[0] * distance.at(0.0);
        points[n] = ends[1] + normals[1] * distance.at(1.0);

        let inner = if order == Order::Quadratic { 1 } else { 2 };
        match distance {
            Distance::Constant(_) => {
                for i in 0..inner {
                    let p = points[i * n];
                    #[allow(clippy::cast_precision_loss)]
                    let d = self.derivative(i as f64);
                    points[i + 1] = line_line_intersection(&p, &(p + d), &origin, &self.points[i + 1])
                        .ok_or_else(|| {
                            GeometryError::Degenerate(
                                "control point lies on the scaling origin".into(),
                            )
                        })?;
                }
            }
            Distance::Varying(_) => {
                let clockwise = self.is_clockwise();
                for i in 0..inner {
                    let p = self.points[i + 1];
                    let towards = (p - origin).try_normalize(0.0).ok_or_else(|| {
                        GeometryError::Degenerate(
                            "control point lies on the scaling origin".into(),
                        )
                    })?;
                    #[allow(clippy::cast_precision_loss)]
                    let mut r = distance.at((i + 1) as f64 / n as f64);
                    if !clockwise {
                        r = -r;
                    }
                    points[i + 1] = p + towards * r;
                }
            }
        }

        Ok(Self::with_domain(points, self.domain))
    }

    /// The same curve with one more control point.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn raise_order(&self) -> Bezier {
        let p = &self.points;
        let n = p.len();
        let k = n as f64;
        let mut raised = Vec::with_capacity(n + 1);
        raised.push(p[0]);
        for i in 1..n {
            let a = i as f64 / k;
            raised.push(Point2::from(p[i - 1].coords * a + p[i].coords * (1.0 - a)));
        }
        raised.push(p[n - 1]);
        Self::with_domain(raised, self.domain)
    }

    /// Translation of every control point along the chord normal.
    fn translated(&self, distance: Distance<'_>) -> Result<Bezier> {
        let chord = self.end() - self.start();
        let normal = Vector2::new(-chord.y, chord.x)
            .try_normalize(0.0)
            .or_else(|| self.normal(0.0))
            .ok_or_else(|| {
                GeometryError::Degenerate("cannot offset a zero-length curve".into())
            })?;
        let last = self.degree().max(1);
        #[allow(clippy::cast_precision_loss)]
        let points = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| p + normal * distance.at(i as f64 / last as f64))
            .collect();
        Ok(Self::with_domain(points, self.domain))
    }

    fn end_normal(&self, t: f64) -> Result<Vector2> {
        self.normal(t).ok_or_else(|| {
            GeometryError::Degenerate(format!("curve has no normal at t = {t}")).into()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::tests::{cubic, quadratic};
    use super::*;
    use approx::assert_relative_eq;

    fn distance_to_curve(c: &Bezier, p: &Point2) -> f64 {
        c.lut(2000)
            .iter()
            .map(|q| (q - p).norm())
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn offset_at_moves_along_normal() {
        let c = cubic();
        let o = c.offset_at(0.0, 10.0).unwrap();
        assert_eq!(o.point, c.start());
        assert!((o.offset.x - 124.258).abs() < 1e-3, "{:?}", o.offset);
        assert!((o.offset.y - 130.952).abs() < 1e-3, "{:?}", o.offset);
    }

    #[test]
    fn linear_offset_translates() {
        let l = Bezier::from_coords(&[(0.0, 0.0), (100.0, 0.0)]).unwrap();
        let out = l.offset(5.0).unwrap();
        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0].start(), Point2::new(0.0, 5.0), epsilon = 1e-12);
        assert_relative_eq!(out[0].end(), Point2::new(100.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn cubic_offset_keeps_distance() {
        let c = cubic();
        let pieces = c.offset(10.0).unwrap();
        assert_eq!(pieces.len(), c.reduce().len());
        for piece in &pieces {
            for p in piece.lut(20).iter() {
                let d = distance_to_curve(&c, p);
                assert!((d - 10.0).abs() < 0.5, "d={d}");
            }
        }
        for w in pieces.windows(2) {
            assert!((w[0].end() - w[1].start()).norm() < 0.5);
        }
    }

    #[test]
    fn scale_simple_quadratic() {
        let q = Bezier::from_coords(&[(0.0, 0.0), (50.0, 30.0), (100.0, 0.0)]).unwrap();
        let s = q.scale(-5.0).unwrap();
        let n0 = q.normal(0.0).unwrap();
        assert_relative_eq!(s.start(), q.start() - n0 * 5.0, epsilon = 1e-9);
        // Tangents at the ends are preserved.
        let t0 = s.tangent(0.0).unwrap();
        assert_relative_eq!(t0, q.tangent(0.0).unwrap(), epsilon = 1e-9);
    }

    #[test]
    fn varying_distance_raises_quadratics() {
        let q = Bezier::from_coords(&[(0.0, 0.0), (50.0, 30.0), (100.0, 0.0)]).unwrap();
        let taper = |t: f64| 2.0 + 8.0 * t;
        let s = q.scale(&taper).unwrap();
        assert_eq!(s.order(), Order::Cubic);
        let n1 = q.normal(1.0).unwrap();
        assert_relative_eq!(s.end(), q.end() + n1 * 10.0, epsilon = 1e-9);
    }

    #[test]
    fn scale_rejects_parallel_end_normals() {
        let c =
            Bezier::from_coords(&[(0.0, 0.0), (30.0, 20.0), (70.0, -20.0), (100.0, 0.0)]).unwrap();
        assert!(matches!(
            c.scale(5.0),
            Err(crate::BezkitError::Geometry(GeometryError::Degenerate(_)))
        ));
    }

    #[test]
    fn scale_rejects_high_orders() {
        let c = Bezier::from_coords(&[(0.0, 0.0), (1.0, 2.0), (2.0, -1.0), (3.0, 2.0), (4.0, 0.0)])
            .unwrap();
        assert!(matches!(
            c.scale(1.0),
            Err(crate::BezkitError::Geometry(GeometryError::UnsupportedOrder {
                order: 4,
                ..
            }))
        ));
    }

    #[test]
    fn raise_order_preserves_shape() {
        let q = quadratic();
        let r = q.raise_order();
        assert_eq!(r.order(), Order::Cubic);
        assert_relative_eq!(r.points()[1], Point2::new(36.666_666_666_666_664, 143.333_333_333_333_34), epsilon = 1e-9);
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            assert_relative_eq!(r.evaluate(t), q.evaluate(t), epsilon = 1e-9);
        }
    }
}
