use super::{between, Point2};

/// How one rectangle relates to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `self` contains the other rectangle.
    Encloses,
    /// `self` lies inside the other rectangle.
    Enclosed,
    /// The rectangles overlap without containment.
    Intersects,
    /// The rectangles do not touch.
    Separate,
}

/// Axis-aligned rectangle in y-up coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsRectangle {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl Default for BoundsRectangle {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundsRectangle {
    /// Creates a rectangle from its four sides.
    #[must_use]
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// The identity for [`union`](Self::union): contains nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY)
    }

    /// Smallest rectangle containing every point.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Self {
        points
            .into_iter()
            .fold(Self::empty(), |acc, p| acc.include_point(p))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left > self.right || self.bottom > self.top
    }

    /// Returns this rectangle grown to contain `p`.
    #[must_use]
    pub fn include_point(&self, p: &Point2) -> Self {
        Self::new(
            self.left.min(p.x),
            self.bottom.min(p.y),
            self.right.max(p.x),
            self.top.max(p.y),
        )
    }

    /// Returns the horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Returns the vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Returns the area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(
            self.left.midpoint(self.right),
            self.bottom.midpoint(self.top),
        )
    }

    /// Segment from the bottom-left corner to the top-right corner.
    #[must_use]
    pub fn diagonal(&self) -> [Point2; 2] {
        [
            Point2::new(self.left, self.bottom),
            Point2::new(self.right, self.top),
        ]
    }

    /// The sides as `(left, bottom, right, top)`.
    #[must_use]
    pub fn points(&self) -> (f64, f64, f64, f64) {
        (self.left, self.bottom, self.right, self.top)
    }

    /// The four edges, counter-clockwise from the bottom-left corner.
    #[must_use]
    pub fn contour(&self) -> [[Point2; 2]; 4] {
        let bl = Point2::new(self.left, self.bottom);
        let br = Point2::new(self.right, self.bottom);
        let tr = Point2::new(self.right, self.top);
        let tl = Point2::new(self.left, self.top);
        [[bl, br], [br, tr], [tr, tl], [tl, bl]]
    }

    /// Absolute x coordinate of an offset measured from the left side.
    #[must_use]
    pub fn x_from_left(&self, offset: f64) -> f64 {
        self.left + offset
    }

    /// Absolute y coordinate of an offset measured from the bottom side.
    #[must_use]
    pub fn y_from_bottom(&self, offset: f64) -> f64 {
        self.bottom + offset
    }

    /// Whether `p` lies inside or on the rectangle, within `EPSILON`.
    #[must_use]
    pub fn encloses_point(&self, p: &Point2) -> bool {
        between(p.x, self.left, self.right) && between(p.y, self.bottom, self.top)
    }

    /// Whether `other` lies entirely inside this rectangle.
    #[must_use]
    pub fn encloses(&self, other: &Self) -> bool {
        self.left <= other.left
            && self.bottom <= other.bottom
            && self.right >= other.right
            && self.top >= other.top
    }

    /// Whether the vertical line at `x` crosses the rectangle.
    #[must_use]
    pub fn crosses_x(&self, x: f64) -> bool {
        between(x, self.left, self.right)
    }

    /// Whether the horizontal line at `y` crosses the rectangle.
    #[must_use]
    pub fn crosses_y(&self, y: f64) -> bool {
        between(y, self.bottom, self.top)
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.left.min(other.left),
            self.bottom.min(other.bottom),
            self.right.max(other.right),
            self.top.max(other.top),
        )
    }

    /// Overlapping region, or `None` when the rectangles are disjoint.
    ///
    /// Rectangles that only share an edge or a corner intersect in a
    /// zero-area rectangle.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let r = Self::new(
            self.left.max(other.left),
            self.bottom.max(other.bottom),
            self.right.min(other.right),
            self.top.min(other.top),
        );
        (!r.is_empty()).then_some(r)
    }

    #[must_use]
    pub fn relation_to(&self, other: &Self) -> Relation {
        if self.encloses(other) {
            Relation::Encloses
        } else if other.encloses(self) {
            Relation::Enclosed
        } else if self.intersection(other).is_some() {
            Relation::Intersects
        } else {
            Relation::Separate
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rect(l: f64, b: f64, r: f64, t: f64) -> BoundsRectangle {
        BoundsRectangle::new(l, b, r, t)
    }

    #[test]
    fn from_points_spans_extremes() {
        let pts = [
            Point2::new(3.0, -1.0),
            Point2::new(-2.0, 4.0),
            Point2::new(1.0, 1.0),
        ];
        let b = BoundsRectangle::from_points(&pts);
        assert_eq!(b.points(), (-2.0, -1.0, 3.0, 4.0));
        assert!((b.width() - 5.0).abs() < 1e-12);
        assert!((b.height() - 5.0).abs() < 1e-12);
        assert!((b.area() - 25.0).abs() < 1e-12);
        assert_eq!(b.center(), Point2::new(0.5, 1.5));
    }

    #[test]
    fn empty_is_union_identity() {
        let b = rect(0.0, 0.0, 1.0, 2.0);
        assert!(BoundsRectangle::empty().is_empty());
        assert_eq!(BoundsRectangle::empty().union(&b), b);
    }

    #[test]
    fn touching_rectangles_intersect() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let b = rect(1.0, 0.0, 2.0, 1.0);
        let i = a.intersection(&b).unwrap();
        assert!(i.width().abs() < 1e-12);
        assert!(rect(0.0, 0.0, 1.0, 1.0)
            .intersection(&rect(1.5, 0.0, 2.0, 1.0))
            .is_none());
    }

    #[test]
    fn relations() {
        let big = rect(0.0, 0.0, 10.0, 10.0);
        let small = rect(2.0, 2.0, 3.0, 3.0);
        let shifted = rect(5.0, 5.0, 15.0, 15.0);
        let far = rect(20.0, 20.0, 30.0, 30.0);
        assert_eq!(big.relation_to(&small), Relation::Encloses);
        assert_eq!(small.relation_to(&big), Relation::Enclosed);
        assert_eq!(big.relation_to(&shifted), Relation::Intersects);
        assert_eq!(big.relation_to(&far), Relation::Separate);
    }

    #[test]
    fn encloses_point_uses_tolerance() {
        let b = rect(0.0, 0.0, 10.0, 0.0);
        assert!(b.encloses_point(&Point2::new(5.0, 1e-8)));
        assert!(!b.encloses_point(&Point2::new(5.0, 0.1)));
        assert!(b.crosses_x(10.0));
        assert!(!b.crosses_y(1.0));
    }

    #[test]
    fn contour_is_closed() {
        let edges = rect(0.0, 0.0, 2.0, 1.0).contour();
        for i in 0..4 {
            assert_eq!(edges[i][1], edges[(i + 1) % 4][0]);
        }
    }
}
