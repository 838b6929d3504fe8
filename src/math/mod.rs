pub mod bounds_2d;
pub mod intersect_2d;
pub mod matrix;
pub mod roots;
pub mod transform_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3x3 homogeneous transformation matrix.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Looser tolerance used when clamping roots and comparing coordinates.
pub const EPSILON: f64 = 1e-6;

/// Returns `true` when `a` and `b` differ by at most `precision`.
#[must_use]
pub fn approximately(a: f64, b: f64, precision: f64) -> bool {
    (a - b).abs() <= precision
}

/// Returns `true` when `v` lies in `[min(a, b), max(a, b)]`, widened by [`EPSILON`].
#[must_use]
pub fn between(v: f64, a: f64, b: f64) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    (lo - EPSILON..=hi + EPSILON).contains(&v)
}

/// Linear interpolation between two points.
#[must_use]
pub fn lerp(t: f64, p1: &Point2, p2: &Point2) -> Point2 {
    p1 + (p2 - p1) * t
}

/// Maps `v` from the range `[ds, de]` onto `[ts, te]`.
#[must_use]
pub fn map_range(v: f64, ds: f64, de: f64, ts: f64, te: f64) -> f64 {
    let d1 = de - ds;
    let d2 = te - ts;
    let v2 = v - ds;
    let r = v2 / d1;
    ts + d2 * r
}

/// Signed angle at `origin` from the ray towards `v1` to the ray towards `v2`.
#[must_use]
pub fn angle(origin: &Point2, v1: &Point2, v2: &Point2) -> f64 {
    let a = v1 - origin;
    let b = v2 - origin;
    let cross = a.x * b.y - a.y * b.x;
    let dot = a.dot(&b);
    cross.atan2(dot)
}

/// Real cube root that keeps the sign of negative inputs.
#[must_use]
pub fn crt(v: f64) -> f64 {
    v.cbrt()
}

/// Rounds `v` to the nearest multiple of `1 / resolution`.
#[must_use]
pub fn round_to(v: f64, resolution: f64) -> f64 {
    (v * resolution).round() / resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn between_is_order_independent() {
        assert!(between(5.0, 10.0, 0.0));
        assert!(between(0.0, 0.0, 10.0));
        assert!(between(10.0 + 1e-7, 0.0, 10.0));
        assert!(!between(10.1, 0.0, 10.0));
    }

    #[test]
    fn map_range_rescales() {
        assert!((map_range(0.25, 0.0, 1.0, 0.5, 1.0) - 0.625).abs() < TOLERANCE);
        assert!((map_range(5.0, 0.0, 10.0, 0.0, 100.0) - 50.0).abs() < TOLERANCE);
    }

    #[test]
    fn angle_is_signed() {
        let o = Point2::origin();
        let x = Point2::new(1.0, 0.0);
        let y = Point2::new(0.0, 1.0);
        assert!((angle(&o, &x, &y) - FRAC_PI_2).abs() < TOLERANCE);
        assert!((angle(&o, &y, &x) + FRAC_PI_2).abs() < TOLERANCE);
    }

    #[test]
    fn crt_handles_negative_values() {
        assert!((crt(-8.0) + 2.0).abs() < TOLERANCE);
        assert!((crt(27.0) - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn round_to_resolution() {
        assert!((round_to(0.123_456_7, 1e5) - 0.123_46).abs() < 1e-12);
        assert!((round_to(0.999_996, 1e5) - 1.0).abs() < 1e-12);
    }
}
