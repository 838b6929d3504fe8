use super::bounds_2d::BoundsRectangle;
use super::{Point2, TOLERANCE};

/// Intersection of the infinite line through `p1`, `p2` with the infinite line
/// through `p3`, `p4`.
///
/// Returns `None` when the lines are parallel or either one is degenerate.
#[must_use]
pub fn line_line_intersection(p1: &Point2, p2: &Point2, p3: &Point2, p4: &Point2) -> Option<Point2> {
    let nx = (p1.x * p2.y - p1.y * p2.x) * (p3.x - p4.x) - (p1.x - p2.x) * (p3.x * p4.y - p3.y * p4.x);
    let ny = (p1.x * p2.y - p1.y * p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x * p4.y - p3.y * p4.x);
    let d = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if d.abs() < TOLERANCE {
        return None;
    }
    Some(Point2::new(nx / d, ny / d))
}

/// Intersection of two bounded segments.
///
/// The infinite-line intersection is accepted only when it falls inside the
/// bounding rectangles of both segments.
#[must_use]
pub fn segment_intersection(l1: &[Point2; 2], l2: &[Point2; 2]) -> Option<Point2> {
    let point = line_line_intersection(&l1[0], &l1[1], &l2[0], &l2[1])?;
    let b1 = BoundsRectangle::from_points(l1);
    let b2 = BoundsRectangle::from_points(l2);
    (b1.encloses_point(&point) && b2.encloses_point(&point)).then_some(point)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn crossing_lines() {
        let p = line_line_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(10.0, 10.0),
            &Point2::new(0.0, 10.0),
            &Point2::new(10.0, 0.0),
        )
        .unwrap();
        assert!((p.x - 5.0).abs() < TOLERANCE);
        assert!((p.y - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn parallel_lines() {
        let p = line_line_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(10.0, 0.0),
            &Point2::new(0.0, 5.0),
            &Point2::new(10.0, 5.0),
        );
        assert!(p.is_none());
    }

    #[test]
    fn intersection_outside_both_segments() {
        let l1 = [Point2::new(50.0, 250.0), Point2::new(150.0, 190.0)];
        let l2 = [Point2::new(50.0, 50.0), Point2::new(170.0, 130.0)];

        let p = line_line_intersection(&l1[0], &l1[1], &l2[0], &l2[1]).unwrap();
        assert!((p.x - 3950.0 / 19.0).abs() < 1e-9, "x={}", p.x);
        assert!((p.y - 2950.0 / 19.0).abs() < 1e-9, "y={}", p.y);

        assert!(segment_intersection(&l1, &l2).is_none());
    }

    #[test]
    fn segments_crossing_inside() {
        let l1 = [Point2::new(0.0, 0.0), Point2::new(4.0, 4.0)];
        let l2 = [Point2::new(0.0, 4.0), Point2::new(4.0, 0.0)];
        let p = segment_intersection(&l1, &l2).unwrap();
        assert!((p.x - 2.0).abs() < TOLERANCE);
        assert!((p.y - 2.0).abs() < TOLERANCE);
    }
}
