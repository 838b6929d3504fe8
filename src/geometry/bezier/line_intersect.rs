use crate::math::bounds_2d::BoundsRectangle;
use crate::math::intersect_2d::line_line_intersection;
use crate::math::roots::bezier_roots;
use crate::math::Point2;

use super::{Bezier, Order};

impl Bezier {
    /// Parameters in `[0, 1]` where the curve crosses `y = 0`.
    #[must_use]
    pub fn roots(&self) -> Vec<f64> {
        let ys: Vec<f64> = self.points.iter().map(|p| p.y).collect();
        bezier_roots(&ys)
    }

    /// Parameters where the curve crosses the infinite line through `line`.
    #[must_use]
    pub fn line_roots(&self, line: &[Point2; 2]) -> Vec<f64> {
        let ys: Vec<f64> = self.aligned_points(line).iter().map(|p| p.y).collect();
        bezier_roots(&ys)
    }

    /// Parameters where the curve crosses the segment `line`.
    #[must_use]
    pub fn line_intersections(&self, line: &[Point2; 2]) -> Vec<f64> {
        let bounds = BoundsRectangle::from_points(line);
        self.line_roots(line)
            .into_iter()
            .filter(|&t| bounds.encloses_point(&self.evaluate(t)))
            .collect()
    }

    /// Where this curve meets the infinite line through `line`'s end points.
    ///
    /// A linear `self` is treated as an infinite line too. Otherwise the
    /// first crossing parameter is used.
    #[must_use]
    pub fn intersect_with_line(&self, line: &Bezier) -> Option<Point2> {
        if self.order() == Order::Linear {
            return line_line_intersection(&self.start(), &self.end(), &line.start(), &line.end());
        }
        let root = *self.line_roots(&[line.start(), line.end()]).first()?;
        Some(self.evaluate(root))
    }

    /// Whether the bounding boxes of the two curves touch or overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Bezier) -> bool {
        self.bounds().intersection(&other.bounds()).is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::tests::cubic;
    use super::*;

    fn horizontal(y: f64, x0: f64, x1: f64) -> [Point2; 2] {
        [Point2::new(x0, y), Point2::new(x1, y)]
    }

    #[test]
    fn roots_against_x_axis() {
        let c = Bezier::from_coords(&[(0.0, -10.0), (50.0, 30.0), (100.0, -10.0)]).unwrap();
        let r = c.roots();
        assert_eq!(r.len(), 2, "{r:?}");
        for t in r {
            assert!(c.evaluate(t).y.abs() < 1e-9);
        }
    }

    #[test]
    fn line_roots_hit_the_line() {
        let c = cubic();
        let line = horizontal(150.0, 0.0, 300.0);
        let r = c.line_roots(&line);
        assert!(!r.is_empty());
        for t in r {
            assert!((c.evaluate(t).y - 150.0).abs() < 1e-6, "t={t}");
        }
    }

    #[test]
    fn line_intersections_respect_segment_extent() {
        let c = cubic();
        let all = c.line_roots(&horizontal(150.0, 0.0, 300.0));
        let hits = c.line_intersections(&horizontal(150.0, 0.0, 300.0));
        assert_eq!(all.len(), hits.len());
        let none = c.line_intersections(&horizontal(150.0, 400.0, 500.0));
        assert!(none.is_empty());
    }

    #[test]
    fn infinite_line_intersection_between_lines() {
        let l1 = Bezier::from_coords(&[(50.0, 250.0), (150.0, 190.0)]).unwrap();
        let l2 = Bezier::from_coords(&[(50.0, 50.0), (170.0, 130.0)]).unwrap();
        let p = l1.intersect_with_line(&l2).unwrap();
        assert!((p.x - 207.894_736_842).abs() < 1e-6, "x={}", p.x);
        assert!((p.y - 155.263_157_894).abs() < 1e-6, "y={}", p.y);
    }

    #[test]
    fn curve_meets_line() {
        let c = cubic();
        let line = Bezier::new(horizontal(150.0, 0.0, 300.0).to_vec()).unwrap();
        let p = c.intersect_with_line(&line).unwrap();
        assert!((p.y - 150.0).abs() < 1e-6);
        let far = Bezier::new(horizontal(1000.0, 0.0, 300.0).to_vec()).unwrap();
        assert!(c.intersect_with_line(&far).is_none());
    }

    #[test]
    fn overlap_includes_touching() {
        let a = Bezier::from_coords(&[(0.0, 0.0), (10.0, 10.0)]).unwrap();
        let b = Bezier::from_coords(&[(10.0, 10.0), (20.0, 0.0)]).unwrap();
        let c = Bezier::from_coords(&[(30.0, 0.0), (40.0, 10.0)]).unwrap();
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
