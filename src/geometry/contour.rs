use std::sync::Arc;

use crate::error::{GeometryError, Result, TopologyError};
use crate::math::bounds_2d::BoundsRectangle;
use crate::math::{Point2, Vector2};
use crate::operations::query::{ClosestPointOnContour, ClosestPointParams, ClosestPointResult};

use super::bezier::Bezier;
use super::curve::{Curve, CurveDomain};
use super::lut::LutCache;

/// Maximum gap allowed between the end of one segment and the start of
/// the next.
pub const JOINT_TOLERANCE: f64 = 1e-9;

/// An ordered chain of curves where each curve starts where the previous
/// one ends.
#[derive(Debug, Clone)]
pub struct Contour {
    curves: Vec<Bezier>,
    bounds: BoundsRectangle,
    lut: LutCache,
}

impl Contour {
    /// Builds a contour from control point lists, one per segment.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no segments, a segment has no points,
    /// or consecutive segments do not share their joint.
    pub fn new(segments: Vec<Vec<Point2>>) -> Result<Self> {
        let curves = segments
            .into_iter()
            .map(Bezier::new)
            .collect::<Result<Vec<_>>>()?;
        Self::from_curves(curves)
    }

    /// Builds a contour from existing curves.
    ///
    /// # Errors
    ///
    /// Returns an error if `curves` is empty or consecutive curves do not
    /// share their joint.
    pub fn from_curves(curves: Vec<Bezier>) -> Result<Self> {
        if curves.is_empty() {
            return Err(TopologyError::EmptyContour.into());
        }
        for (i, w) in curves.windows(2).enumerate() {
            check_joint(&w[0], &w[1], i + 1)?;
        }
        let bounds = union_bounds(&curves);
        Ok(Self {
            curves,
            bounds,
            lut: LutCache::default(),
        })
    }

    /// Returns the curves in order.
    #[must_use]
    pub fn curves(&self) -> &[Bezier] {
        &self.curves
    }

    /// Returns the curve at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Bezier> {
        self.curves.get(index)
    }

    /// Returns an iterator over the curves.
    pub fn iter(&self) -> std::slice::Iter<'_, Bezier> {
        self.curves.iter()
    }

    /// Returns the number of curves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Always `false`: a contour holds at least one curve.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Returns the start point of the first curve.
    #[must_use]
    pub fn start(&self) -> Point2 {
        self.curves[0].start()
    }

    /// Returns the end point of the last curve.
    #[must_use]
    pub fn end(&self) -> Point2 {
        self.curves[self.curves.len() - 1].end()
    }

    /// Union of the bounds of every curve.
    #[must_use]
    pub fn bounds(&self) -> BoundsRectangle {
        self.bounds
    }

    /// Replaces the control points of one segment.
    ///
    /// The contour is left untouched when the new segment would break a
    /// joint.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range index, empty `points`, or a
    /// segment that does not connect to its neighbours.
    pub fn replace(&mut self, index: usize, points: Vec<Point2>) -> Result<()> {
        let len = self.curves.len();
        if index >= len {
            return Err(TopologyError::IndexOutOfRange { index, len }.into());
        }
        let curve = Bezier::new(points)?;
        if index > 0 {
            check_joint(&self.curves[index - 1], &curve, index)?;
        }
        if let Some(next) = self.curves.get(index + 1) {
            check_joint(&curve, next, index + 1)?;
        }
        self.curves[index] = curve;
        self.bounds = union_bounds(&self.curves);
        self.lut.clear();
        Ok(())
    }

    /// Concatenated lookup tables of every curve, with each shared joint
    /// listed once.
    ///
    /// The result holds `steps + (len - 1) * (steps - 1)` points.
    #[must_use]
    pub fn lut(&self, steps: usize) -> Arc<[Point2]> {
        let steps = steps.max(2);
        self.lut.get_or_build(steps, || {
            let mut table = Vec::with_capacity(steps * self.curves.len());
            for (i, curve) in self.curves.iter().enumerate() {
                let skip = usize::from(i > 0);
                table.extend(curve.lut(steps).iter().skip(skip));
            }
            table
        })
    }

    /// Nearest point on the contour to `point`, sampling each curve with
    /// `steps` points before refining.
    #[must_use]
    pub fn find_closest_point(&self, point: Point2, steps: usize) -> ClosestPointResult {
        let params = ClosestPointParams {
            steps,
            ..ClosestPointParams::default()
        };
        ClosestPointOnContour::new(point)
            .params(params)
            .execute(self)
    }
}

impl<'a> IntoIterator for &'a Contour {
    type Item = &'a Bezier;
    type IntoIter = std::slice::Iter<'a, Bezier>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.iter()
    }
}

/// Parameters run over `[0, len]`: the integer part selects the curve and
/// the fraction is the parameter on it.
impl Curve for Contour {
    fn evaluate(&self, t: f64) -> Result<Point2> {
        let (curve, local) = self.locate(t)?;
        Ok(curve.evaluate(local))
    }

    fn tangent(&self, t: f64) -> Result<Vector2> {
        let (curve, local) = self.locate(t)?;
        curve.tangent(local).ok_or_else(|| {
            GeometryError::Degenerate(format!("contour has no tangent at t = {t}")).into()
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.curves.len() as f64)
    }

    fn is_closed(&self) -> bool {
        (self.end() - self.start()).norm() < JOINT_TOLERANCE
    }
}

impl Contour {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn locate(&self, t: f64) -> Result<(&Bezier, f64)> {
        let domain = Curve::domain(self);
        if !domain.contains(t) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: domain.t_min,
                max: domain.t_max,
            }
            .into());
        }
        let index = (t.floor() as usize).min(self.curves.len() - 1);
        Ok((&self.curves[index], t - index as f64))
    }
}

fn check_joint(prev: &Bezier, next: &Bezier, index: usize) -> Result<()> {
    if (prev.end() - next.start()).norm() > JOINT_TOLERANCE {
        return Err(TopologyError::Disconnected { index }.into());
    }
    Ok(())
}

fn union_bounds(curves: &[Bezier]) -> BoundsRectangle {
    curves
        .iter()
        .fold(BoundsRectangle::empty(), |b, c| b.union(&c.bounds()))
}
