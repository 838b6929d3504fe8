use tracing::{debug, warn};

use crate::error::{GeometryError, Result};
use crate::geometry::Bezier;
use crate::math::round_to;

/// Intersection parameters are rounded to multiples of `1 / RESOLUTION`.
const RESOLUTION: f64 = 100_000.0;

/// Tuning for the subdivision-based intersection search.
#[derive(Debug, Clone, Copy)]
pub struct IntersectionParams {
    /// A pair of curves whose bounding boxes both have `width + height`
    /// below this is reported as an intersection.
    pub threshold: f64,
    /// Maximum number of halvings for a single pair.
    pub max_depth: usize,
    /// Maximum number of curve pairs examined per search.
    pub max_pairs: usize,
}

impl Default for IntersectionParams {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            max_depth: 48,
            max_pairs: 1 << 16,
        }
    }
}

/// Parameter pairs `(t_self, t_other)` on two curves, both in the original
/// curves' `[0, 1]` parameter space.
pub type IntersectionPairs = Vec<(f64, f64)>;

/// Finds where two curves cross.
pub struct CurveIntersect<'a> {
    curve: &'a Bezier,
    other: &'a Bezier,
    params: IntersectionParams,
}

impl<'a> CurveIntersect<'a> {
    #[must_use]
    pub fn new(curve: &'a Bezier, other: &'a Bezier) -> Self {
        Self {
            curve,
            other,
            params: IntersectionParams::default(),
        }
    }

    #[must_use]
    pub fn params(mut self, params: IntersectionParams) -> Self {
        self.params = params;
        self
    }

    /// Reduces both curves into simple pieces and intersects every
    /// overlapping pair of pieces.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Irreducible`] when either curve cannot be
    /// reduced.
    pub fn execute(&self) -> Result<IntersectionPairs> {
        let left = reduced(self.curve)?;
        let right = reduced(self.other)?;
        Ok(curve_intersects(&left, &right, &self.params))
    }
}

/// Finds where a curve crosses itself.
pub struct SelfIntersect<'a> {
    curve: &'a Bezier,
    params: IntersectionParams,
}

impl<'a> SelfIntersect<'a> {
    #[must_use]
    pub fn new(curve: &'a Bezier) -> Self {
        Self {
            curve,
            params: IntersectionParams::default(),
        }
    }

    #[must_use]
    pub fn params(mut self, params: IntersectionParams) -> Self {
        self.params = params;
        self
    }

    /// Intersects each reduced piece with every piece at least two
    /// positions further along. Neighbouring simple pieces only meet at
    /// their shared end point.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Irreducible`] when the curve cannot be
    /// reduced.
    pub fn execute(&self) -> Result<IntersectionPairs> {
        let reduced = reduced(self.curve)?;
        let mut results = Vec::new();
        for (i, piece) in reduced.iter().enumerate() {
            let Some(rest) = reduced.get(i + 2..) else {
                break;
            };
            results.extend(curve_intersects(
                std::slice::from_ref(piece),
                rest,
                &self.params,
            ));
        }
        Ok(results)
    }
}

fn reduced(curve: &Bezier) -> Result<Vec<Bezier>> {
    let pieces = curve.reduce();
    if pieces.is_empty() {
        debug!(points = ?curve.points(), "cannot intersect an irreducible curve");
        return Err(GeometryError::Irreducible.into());
    }
    Ok(pieces)
}

impl Bezier {
    /// Intersections with `other`, or self-intersections when `other` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Irreducible`] when a curve cannot be reduced.
    pub fn intersects(&self, other: Option<&Bezier>, threshold: f64) -> Result<IntersectionPairs> {
        let params = IntersectionParams {
            threshold,
            ..IntersectionParams::default()
        };
        match other {
            Some(other) => CurveIntersect::new(self, other).params(params).execute(),
            None => SelfIntersect::new(self).params(params).execute(),
        }
    }
}

/// Runs [`pair_iteration`] on every overlapping pair drawn from the two
/// lists, concatenating the results.
#[must_use]
pub fn curve_intersects(
    left: &[Bezier],
    right: &[Bezier],
    params: &IntersectionParams,
) -> IntersectionPairs {
    let mut results = Vec::new();
    for l in left {
        for r in right {
            if l.overlaps(r) {
                results.extend(pair_iteration(l, r, params));
            }
        }
    }
    results
}

/// Subdivides two curves until their bounding boxes are small, reporting the
/// midpoints of the converged parameter ranges.
///
/// Results are rounded and deduplicated, keeping first-found order. The
/// search stops early, with a warning, once it exceeds the depth or pair
/// budget in `params`.
#[must_use]
pub fn pair_iteration(c1: &Bezier, c2: &Bezier, params: &IntersectionParams) -> IntersectionPairs {
    let mut results: IntersectionPairs = Vec::new();
    let mut pending = vec![(c1.clone(), c2.clone(), 0_usize)];
    let mut visited = 0_usize;
    let mut depth_capped = false;

    while let Some((a, b, depth)) = pending.pop() {
        visited += 1;
        if visited > params.max_pairs {
            warn!(
                max_pairs = params.max_pairs,
                found = results.len(),
                "intersection search exceeded its pair budget"
            );
            break;
        }

        let (ab, bb) = (a.bounds(), b.bounds());
        let converged = ab.width() + ab.height() < params.threshold
            && bb.width() + bb.height() < params.threshold;
        if converged || depth >= params.max_depth {
            depth_capped |= !converged;
            let pair = (
                round_to(a.parameter_range().midpoint(), RESOLUTION),
                round_to(b.parameter_range().midpoint(), RESOLUTION),
            );
            if !results.contains(&pair) {
                results.push(pair);
            }
            continue;
        }

        let (a_left, a_right) = a.split(0.5);
        let (b_left, b_right) = b.split(0.5);
        let children = [
            (a_left.clone(), b_left.clone()),
            (a_left, b_right.clone()),
            (a_right.clone(), b_right),
            (a_right, b_left),
        ];
        // Reverse so the stack pops them in the listed order.
        pending.extend(
            children
                .into_iter()
                .rev()
                .filter(|(x, y)| x.overlaps(y))
                .map(|(x, y)| (x, y, depth + 1)),
        );
    }

    if depth_capped {
        warn!(
            max_depth = params.max_depth,
            "intersection search hit its depth limit; some results did not converge"
        );
    }
    results
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::bezier::tests::cubic;

    fn loop_cubic() -> Bezier {
        Bezier::from_coords(&[(100.0, 100.0), (300.0, 300.0), (0.0, 300.0), (200.0, 100.0)])
            .unwrap()
    }

    // ── pair iteration ──

    #[test]
    fn crossing_lines_converge() {
        let a = Bezier::from_coords(&[(0.0, 0.0), (100.0, 100.0)]).unwrap();
        let b = Bezier::from_coords(&[(0.0, 100.0), (100.0, 0.0)]).unwrap();
        let r = pair_iteration(&a, &b, &IntersectionParams::default());
        assert!(!r.is_empty());
        for (t1, t2) in &r {
            assert!((t1 - 0.5).abs() < 0.01, "t1={t1}");
            assert!((t2 - 0.5).abs() < 0.01, "t2={t2}");
        }
    }

    #[test]
    fn results_are_rounded_and_unique() {
        let a = Bezier::from_coords(&[(0.0, 0.0), (100.0, 100.0)]).unwrap();
        let b = Bezier::from_coords(&[(0.0, 100.0), (100.0, 0.0)]).unwrap();
        let r = pair_iteration(&a, &b, &IntersectionParams::default());
        for (i, x) in r.iter().enumerate() {
            assert!((x.0 * RESOLUTION - (x.0 * RESOLUTION).round()).abs() < 1e-6);
            assert!(!r[i + 1..].contains(x));
        }
    }

    #[test]
    fn disjoint_curves_do_not_intersect() {
        let a = Bezier::from_coords(&[(0.0, 0.0), (10.0, 10.0)]).unwrap();
        let b = Bezier::from_coords(&[(50.0, 0.0), (60.0, 10.0)]).unwrap();
        assert!(pair_iteration(&a, &b, &IntersectionParams::default()).is_empty());
        assert!(a.intersects(Some(&b), 0.5).unwrap().is_empty());
    }

    #[test]
    fn depth_cap_still_reports() {
        let a = Bezier::from_coords(&[(0.0, 0.0), (100.0, 100.0)]).unwrap();
        let b = Bezier::from_coords(&[(0.0, 100.0), (100.0, 0.0)]).unwrap();
        let params = IntersectionParams {
            max_depth: 2,
            ..IntersectionParams::default()
        };
        let r = pair_iteration(&a, &b, &params);
        assert!(!r.is_empty());
    }

    #[test]
    fn pair_budget_stops_search() {
        let a = Bezier::from_coords(&[(0.0, 0.0), (100.0, 100.0)]).unwrap();
        let b = Bezier::from_coords(&[(0.0, 100.0), (100.0, 0.0)]).unwrap();
        let params = IntersectionParams {
            max_pairs: 1,
            ..IntersectionParams::default()
        };
        assert!(pair_iteration(&a, &b, &params).is_empty());
    }

    // ── curve / curve ──

    #[test]
    fn curve_crosses_line() {
        let c = cubic();
        let line = Bezier::from_coords(&[(0.0, 150.0), (300.0, 150.0)]).unwrap();
        let r = c.intersects(Some(&line), 0.5).unwrap();
        assert!(!r.is_empty());
        for (t1, t2) in r {
            let p = c.evaluate(t1);
            let q = line.evaluate(t2);
            assert!((p - q).norm() < 1.0, "p={p:?} q={q:?}");
        }
    }

    // ── self intersection ──

    #[test]
    fn loop_cubic_self_intersects() {
        let c = loop_cubic();
        let r = c.intersects(None, 0.5).unwrap();
        assert!(!r.is_empty());
        for (t1, t2) in r {
            assert!((t1 - 0.1127).abs() < 0.01, "t1={t1}");
            assert!((t2 - 0.8873).abs() < 0.01, "t2={t2}");
            let p = c.evaluate(t1);
            assert!((p.x - 150.0).abs() < 1.0 && (p.y - 159.93).abs() < 1.0, "{p:?}");
        }
    }

    #[test]
    fn simple_cubic_has_no_self_intersection() {
        assert!(cubic().intersects(None, 0.5).unwrap().is_empty());
    }

    #[test]
    fn ten_point_curve_has_no_self_intersection() {
        // Dense sampling of this curve shows no crossing; the search agrees.
        let c = Bezier::from_coords(&[
            (175.0, 178.0),
            (220.0, 250.0),
            (114.0, 285.0),
            (27.0, 267.0),
            (33.0, 159.0),
            (146.0, 143.0),
            (205.0, 33.0),
            (84.0, 117.0),
            (43.0, 59.0),
            (58.0, 24.0),
        ])
        .unwrap();
        assert_eq!(c.reduce().len(), 9);
        assert!(SelfIntersect::new(&c).execute().unwrap().is_empty());
    }

    // ── irreducible input ──

    fn collapsed_handle() -> Bezier {
        Bezier::from_coords(&[(0.0, 0.0), (0.0, 0.0), (100.0, 100.0), (100.0, 0.0)]).unwrap()
    }

    #[test]
    fn irreducible_curve_is_an_error() {
        let c = collapsed_handle();
        let line = Bezier::from_coords(&[(50.0, -10.0), (50.0, 200.0)]).unwrap();
        assert!(c.reduce().is_empty());
        // The curve does cross the line; the query must not pretend otherwise.
        assert_eq!(c.line_roots(&[line.start(), line.end()]).len(), 1);
        assert!(matches!(
            CurveIntersect::new(&c, &line).execute(),
            Err(crate::BezkitError::Geometry(GeometryError::Irreducible))
        ));
        assert!(matches!(
            line.intersects(Some(&c), 0.5),
            Err(crate::BezkitError::Geometry(GeometryError::Irreducible))
        ));
        assert!(matches!(
            SelfIntersect::new(&c).execute(),
            Err(crate::BezkitError::Geometry(GeometryError::Irreducible))
        ));
    }
}
