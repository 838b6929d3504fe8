use super::{Matrix3, Point2, Vector2};

/// Affine transform of the plane, stored as a homogeneous 3x3 matrix acting
/// on column vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    matrix: Matrix3,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Wraps a raw homogeneous matrix.
    #[must_use]
    pub fn from_matrix(matrix: Matrix3) -> Self {
        Self { matrix }
    }

    #[must_use]
    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// Translation moving `from` onto `to`.
    #[must_use]
    pub fn translate(from: &Point2, to: &Point2) -> Self {
        let d = to - from;
        Self::from_matrix(Matrix3::new_translation(&d))
    }

    #[must_use]
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::from_matrix(Matrix3::new_nonuniform_scaling(&Vector2::new(sx, sy)))
    }

    /// Shear with `x' = x + sx * y` and `y' = y + sy * x`.
    #[must_use]
    pub fn shear(sx: f64, sy: f64) -> Self {
        #[rustfmt::skip]
        let m = Matrix3::new(
            1.0, sx, 0.0,
            sy, 1.0, 0.0,
            0.0, 0.0, 1.0,
        );
        Self::from_matrix(m)
    }

    /// Reflection across the x-axis (flips y) and/or the y-axis (flips x).
    #[must_use]
    pub fn mirror(x_axis: bool, y_axis: bool) -> Self {
        let sx = if y_axis { -1.0 } else { 1.0 };
        let sy = if x_axis { -1.0 } else { 1.0 };
        Self::scale(sx, sy)
    }

    /// Rotation about the origin by `degrees`.
    #[must_use]
    pub fn rotation(degrees: f64, ccw: bool) -> Self {
        let radians = if ccw { degrees } else { -degrees }.to_radians();
        Self::from_matrix(Matrix3::new_rotation(radians))
    }

    /// Rotation about an arbitrary point.
    #[must_use]
    pub fn rotation_about(about: &Point2, degrees: f64, ccw: bool) -> Self {
        let origin = Point2::origin();
        Self::translate(about, &origin)
            .then(&Self::rotation(degrees, ccw))
            .then(&Self::translate(&origin, about))
    }

    /// Reflection about an arbitrary point.
    #[must_use]
    pub fn mirror_around(center: &Point2, x_axis: bool, y_axis: bool) -> Self {
        let origin = Point2::origin();
        Self::translate(center, &origin)
            .then(&Self::mirror(x_axis, y_axis))
            .then(&Self::translate(&origin, center))
    }

    /// Translate `from` onto `to`, then rotate about the origin.
    #[must_use]
    pub fn move_and_rotate(from: &Point2, to: &Point2, degrees: f64) -> Self {
        Self::translate(from, to).then(&Self::rotation(degrees, true))
    }

    /// Rotate about the origin, then translate `from` onto `to`.
    #[must_use]
    pub fn rotate_and_move(from: &Point2, to: &Point2, degrees: f64) -> Self {
        Self::rotation(degrees, true).then(&Self::translate(from, to))
    }

    /// Composition applying `self` first and `next` second.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        Self::from_matrix(next.matrix * self.matrix)
    }

    #[must_use]
    pub fn apply_to_point(&self, p: &Point2) -> Point2 {
        self.matrix.transform_point(p)
    }

    #[must_use]
    pub fn apply_to_segment(&self, segment: &[Point2]) -> Vec<Point2> {
        segment.iter().map(|p| self.apply_to_point(p)).collect()
    }

    #[must_use]
    pub fn apply_to_contour(&self, contour: &[Vec<Point2>]) -> Vec<Vec<Point2>> {
        contour.iter().map(|s| self.apply_to_segment(s)).collect()
    }
}
