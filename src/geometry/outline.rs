use crate::error::Result;
use crate::math::bounds_2d::BoundsRectangle;
use crate::math::Point2;

use super::contour::Contour;

/// A set of contours, such as the outline of a glyph.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    contours: Vec<Contour>,
    bounds: BoundsRectangle,
}

impl Outline {
    /// Builds an outline from contours given as lists of segment control
    /// points.
    ///
    /// # Errors
    ///
    /// Returns the first contour construction error.
    pub fn new(contours: Vec<Vec<Vec<Point2>>>) -> Result<Self> {
        let contours = contours
            .into_iter()
            .map(Contour::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_contours(contours))
    }

    /// Builds an outline from existing contours.
    #[must_use]
    pub fn from_contours(contours: Vec<Contour>) -> Self {
        let bounds = contours
            .iter()
            .fold(BoundsRectangle::empty(), |b, c| b.union(&c.bounds()));
        Self { contours, bounds }
    }

    /// Returns the contours.
    #[must_use]
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    /// Returns an iterator over the contours.
    pub fn iter(&self) -> std::slice::Iter<'_, Contour> {
        self.contours.iter()
    }

    /// Returns the number of contours.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contours.len()
    }

    /// Returns `true` if the outline has no contours.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Union of all contour bounds; empty for an empty outline.
    #[must_use]
    pub fn bounds(&self) -> BoundsRectangle {
        self.bounds
    }
}

impl<'a> IntoIterator for &'a Outline {
    type Item = &'a Contour;
    type IntoIter = std::slice::Iter<'a, Contour>;

    fn into_iter(self) -> Self::IntoIter {
        self.contours.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::contour::tests::d_shape;

    fn square(x: f64, y: f64, size: f64) -> Vec<Vec<Point2>> {
        let a = Point2::new(x, y);
        let b = Point2::new(x + size, y);
        let c = Point2::new(x + size, y + size);
        let d = Point2::new(x, y + size);
        vec![vec![a, b], vec![b, c], vec![c, d], vec![d, a]]
    }

    #[test]
    fn bounds_cover_every_contour() {
        let o = Outline::new(vec![square(0.0, 0.0, 10.0), square(50.0, -20.0, 5.0)]).unwrap();
        assert_eq!(o.len(), 2);
        assert_eq!(o.bounds().points(), (0.0, -20.0, 55.0, 10.0));
        assert_eq!(o.iter().map(Contour::len).sum::<usize>(), 8);
    }

    #[test]
    fn from_existing_contours() {
        let o = Outline::from_contours(vec![d_shape()]);
        assert!((o.bounds().right - 60.0).abs() < 1e-9);
        assert!(Outline::default().bounds().is_empty());
    }

    #[test]
    fn invalid_contour_fails() {
        assert!(Outline::new(vec![Vec::new()]).is_err());
    }
}
