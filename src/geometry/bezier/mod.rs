//! Bezier curves of arbitrary order.
//!
//! A [`Bezier`] is immutable once built. Derived data (hodographs, extrema,
//! bounds, arc length, lookup tables) is computed on first use and shared by
//! clones of the same curve.

mod analysis;
mod gauss_legendre;
mod line_intersect;
mod mold;
mod offset;
mod reduce;

use std::sync::{Arc, OnceLock};

pub use analysis::{Direction, Extrema};
pub use mold::Abc;
pub use offset::{Distance, NormalOffset};

use crate::error::{GeometryError, Result};
use crate::math::bounds_2d::BoundsRectangle;
use crate::math::{lerp, map_range, Point2, Vector2};

use super::curve::{Curve, CurveDomain};
use super::lut::LutCache;

/// Number of lookup-table samples used when callers do not pick one.
pub const DEFAULT_LUT_STEPS: usize = 100;

/// Derivatives shorter than this have no usable direction.
const MIN_DERIVATIVE_NORM: f64 = 1e-12;

/// Order of a curve, i.e. its number of control points minus one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Point,
    Linear,
    Quadratic,
    Cubic,
    General(usize),
}

impl Order {
    #[must_use]
    pub fn from_degree(degree: usize) -> Self {
        match degree {
            0 => Self::Point,
            1 => Self::Linear,
            2 => Self::Quadratic,
            3 => Self::Cubic,
            n => Self::General(n),
        }
    }

    #[must_use]
    pub fn degree(self) -> usize {
        match self {
            Self::Point => 0,
            Self::Linear => 1,
            Self::Quadratic => 2,
            Self::Cubic => 3,
            Self::General(n) => n,
        }
    }
}

#[derive(Debug, Default)]
struct Derived {
    hodographs: OnceLock<Vec<Vec<Vector2>>>,
    extrema: OnceLock<Extrema>,
    bounds: OnceLock<BoundsRectangle>,
    length: OnceLock<f64>,
    direction: OnceLock<Direction>,
    lut: LutCache,
}

/// A Bezier curve defined by its control points.
#[derive(Debug, Clone)]
pub struct Bezier {
    points: Vec<Point2>,
    domain: CurveDomain,
    derived: Arc<Derived>,
}

impl PartialEq for Bezier {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points && self.domain == other.domain
    }
}

impl Bezier {
    /// Creates a curve from its control points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Empty`] if `points` is empty.
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        if points.is_empty() {
            return Err(GeometryError::Empty.into());
        }
        Ok(Self::with_domain(points, CurveDomain::default()))
    }

    /// Creates a curve from `(x, y)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Empty`] if `coords` is empty.
    pub fn from_coords(coords: &[(f64, f64)]) -> Result<Self> {
        Self::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    /// Builds a curve without validation. `points` must not be empty.
    pub(crate) fn with_domain(points: Vec<Point2>, domain: CurveDomain) -> Self {
        Self {
            points,
            domain,
            derived: Arc::default(),
        }
    }

    /// Returns the control points.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Returns the first control point.
    #[must_use]
    pub fn start(&self) -> Point2 {
        self.points[0]
    }

    /// Returns the last control point.
    #[must_use]
    pub fn end(&self) -> Point2 {
        self.points[self.points.len() - 1]
    }

    /// Returns the degree, one less than the number of control points.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.points.len() - 1
    }

    /// Returns the order as a tagged variant.
    #[must_use]
    pub fn order(&self) -> Order {
        Order::from_degree(self.degree())
    }

    /// Returns the sub-range of the root curve's `[0, 1]` parameters this
    /// curve was split from.
    ///
    /// This is bookkeeping for splits. The curve itself is still evaluated
    /// over `[0, 1]`, which is what [`Curve::domain`] reports.
    #[must_use]
    pub fn parameter_range(&self) -> CurveDomain {
        self.domain
    }

    /// Point on the curve at local parameter `t`.
    ///
    /// `t = 0` and `t = 1` return the end control points exactly.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn evaluate(&self, t: f64) -> Point2 {
        if t == 0.0 {
            return self.start();
        }
        if t == 1.0 {
            return self.end();
        }
        let p = &self.points;
        let mt = 1.0 - t;
        match self.order() {
            Order::Point => p[0],
            Order::Linear => lerp(t, &p[0], &p[1]),
            Order::Quadratic => {
                let a = mt * mt;
                let b = 2.0 * mt * t;
                let c = t * t;
                Point2::from(p[0].coords * a + p[1].coords * b + p[2].coords * c)
            }
            Order::Cubic => {
                let a = mt * mt * mt;
                let b = 3.0 * mt * mt * t;
                let c = 3.0 * mt * t * t;
                let d = t * t * t;
                Point2::from(
                    p[0].coords * a + p[1].coords * b + p[2].coords * c + p[3].coords * d,
                )
            }
            Order::General(_) => {
                let coords: Vec<Vector2> = p.iter().map(|q| q.coords).collect();
                Point2::from(de_casteljau(&coords, t))
            }
        }
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        self.evaluate(0.5)
    }

    /// Successive derivative control polygons.
    ///
    /// Level 0 holds the first-derivative coefficients, level 1 the second,
    /// and so on down to a single vector. A point curve has no levels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hodographs(&self) -> &[Vec<Vector2>] {
        self.derived.hodographs.get_or_init(|| {
            let mut levels = Vec::new();
            let mut current: Vec<Vector2> = self.points.iter().map(|p| p.coords).collect();
            while current.len() > 1 {
                let n = (current.len() - 1) as f64;
                current = current.windows(2).map(|w| (w[1] - w[0]) * n).collect();
                levels.push(current.clone());
            }
            levels
        })
    }

    /// First derivative at `t`.
    #[must_use]
    pub fn derivative(&self, t: f64) -> Vector2 {
        self.hodographs()
            .first()
            .map_or_else(Vector2::zeros, |d| de_casteljau(d, t))
    }

    /// Unit tangent at `t`, or `None` where the derivative vanishes.
    #[must_use]
    pub fn tangent(&self, t: f64) -> Option<Vector2> {
        self.derivative(t).try_normalize(MIN_DERIVATIVE_NORM)
    }

    /// Unit normal at `t` (the tangent rotated a quarter turn counter-clockwise),
    /// or `None` where the derivative vanishes.
    #[must_use]
    pub fn normal(&self, t: f64) -> Option<Vector2> {
        self.tangent(t).map(|d| Vector2::new(-d.y, d.x))
    }

    /// All de Casteljau points at `t`, level by level, starting with the
    /// control points and ending with the point on the curve.
    #[must_use]
    pub fn hull(&self, t: f64) -> Vec<Point2> {
        let n = self.points.len();
        let mut hull = Vec::with_capacity(n * (n + 1) / 2);
        hull.extend_from_slice(&self.points);
        let mut level = self.points.clone();
        while level.len() > 1 {
            level = level.windows(2).map(|w| lerp(t, &w[0], &w[1])).collect();
            hull.extend_from_slice(&level);
        }
        hull
    }

    /// Splits the curve at `t` into two curves of the same order.
    #[must_use]
    pub fn split(&self, t: f64) -> (Self, Self) {
        let (left, right, _) = self.split_with_hull(t);
        (left, right)
    }

    /// Like [`split`](Self::split), also returning the hull at `t`.
    #[must_use]
    pub fn split_with_hull(&self, t: f64) -> (Self, Self, Vec<Point2>) {
        let hull = self.hull(t);
        let n = self.points.len();
        let mut left = Vec::with_capacity(n);
        let mut right = Vec::with_capacity(n);
        let mut offset = 0;
        for size in (1..=n).rev() {
            left.push(hull[offset]);
            right.push(hull[offset + size - 1]);
            offset += size;
        }
        right.reverse();

        let at = self.domain.map(t);
        let left = Self::with_domain(left, CurveDomain::new(self.domain.t_min, at));
        let right = Self::with_domain(right, CurveDomain::new(at, self.domain.t_max));
        (left, right, hull)
    }

    /// The part of the curve between local parameters `t1` and `t2`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn split_range(&self, t1: f64, t2: f64) -> Self {
        if t1 == 0.0 && t2 != 0.0 {
            return self.split(t2).0;
        }
        if t2 == 1.0 {
            return self.split(t1).1;
        }
        let (_, right) = self.split(t1);
        right.split(map_range(t2, t1, 1.0, 0.0, 1.0)).0
    }

    /// `steps` evenly spaced points from `t = 0` to `t = 1` inclusive.
    ///
    /// At least two points are always produced.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn lut(&self, steps: usize) -> Arc<[Point2]> {
        let steps = steps.max(2);
        self.derived.lut.get_or_build(steps, || {
            let last = (steps - 1) as f64;
            (0..steps).map(|i| self.evaluate(i as f64 / last)).collect()
        })
    }
}

impl Curve for Bezier {
    fn evaluate(&self, t: f64) -> Result<Point2> {
        check_unit(t)?;
        Ok(Bezier::evaluate(self, t))
    }

    fn tangent(&self, t: f64) -> Result<Vector2> {
        check_unit(t)?;
        Bezier::tangent(self, t).ok_or_else(|| {
            GeometryError::Degenerate(format!("curve has no tangent at t = {t}")).into()
        })
    }

    /// Always `[0, 1]`; see [`Bezier::parameter_range`] for the range on
    /// the root curve.
    fn domain(&self) -> CurveDomain {
        CurveDomain::default()
    }

    fn is_closed(&self) -> bool {
        (self.end() - self.start()).norm() < crate::math::TOLERANCE
    }
}

fn check_unit(t: f64) -> Result<()> {
    if (0.0..=1.0).contains(&t) {
        Ok(())
    } else {
        Err(GeometryError::ParameterOutOfRange {
            parameter: "t",
            value: t,
            min: 0.0,
            max: 1.0,
        }
        .into())
    }
}

/// Evaluates Bernstein coefficients at `t` by repeated interpolation.
fn de_casteljau(values: &[Vector2], t: f64) -> Vector2 {
    let mut work = values.to_vec();
    for level in (1..work.len()).rev() {
        for i in 0..level {
            work[i] = work[i].lerp(&work[i + 1], t);
        }
    }
    work.first().copied().unwrap_or_else(Vector2::zeros)
}
