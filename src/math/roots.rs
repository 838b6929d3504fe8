//! Root finding for polynomials given by their Bernstein coefficients.
//!
//! Closed forms cover up to degree 3. Higher degrees fall back to sampling
//! the polynomial with de Casteljau evaluation and bisecting sign changes.

use std::f64::consts::TAU;

use super::{approximately, crt, EPSILON, TOLERANCE};

/// Minimum number of samples used by the numeric fallback.
const MIN_SAMPLES: usize = 64;

/// Bisection steps per bracketed root.
const BISECTION_STEPS: usize = 64;

/// Clamps `t` into `[0, 1]` when it lies within `EPSILON` of the interval,
/// and rejects it otherwise.
#[must_use]
pub fn accept_unit(t: f64) -> Option<f64> {
    if t.is_nan() || t < -EPSILON || t > 1.0 + EPSILON {
        None
    } else {
        Some(t.clamp(0.0, 1.0))
    }
}

/// Roots of a linear or quadratic Bernstein polynomial, unfiltered.
///
/// Used on derivative coefficients. Longer coefficient lists go through
/// [`numeric_roots`].
#[must_use]
pub fn derivative_roots(values: &[f64]) -> Vec<f64> {
    match *values {
        [a, b] => linear_roots(a, b),
        [a, b, c] => quadratic_roots(a, b, c),
        [] | [_] => Vec::new(),
        _ => numeric_roots(values),
    }
}

/// Roots in `[0, 1]` of a Bernstein polynomial of any degree.
#[must_use]
pub fn bezier_roots(values: &[f64]) -> Vec<f64> {
    let candidates = match *values {
        [a, b] => linear_roots(a, b),
        [a, b, c] => quadratic_roots(a, b, c),
        [a, b, c, d] => cubic_roots(a, b, c, d),
        [] | [_] => Vec::new(),
        _ => numeric_roots(values),
    };
    candidates.into_iter().filter_map(accept_unit).collect()
}

fn linear_roots(a: f64, b: f64) -> Vec<f64> {
    if approximately(a, b, TOLERANCE) {
        Vec::new()
    } else {
        vec![a / (a - b)]
    }
}

fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    let d = a - 2.0 * b + c;
    if approximately(d, 0.0, TOLERANCE) {
        // Leading coefficient vanishes; what is left is linear.
        if approximately(a, b, TOLERANCE) {
            return Vec::new();
        }
        return vec![a / (2.0 * (a - b))];
    }
    let discriminant = b * b - a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }
    let m1 = -discriminant.sqrt();
    let m2 = b - a;
    vec![-(m1 + m2) / d, -(-m1 + m2) / d]
}

fn cubic_roots(pa: f64, pb: f64, pc: f64, pd: f64) -> Vec<f64> {
    let d = -pa + 3.0 * pb - 3.0 * pc + pd;
    let mut a = 3.0 * pa - 6.0 * pb + 3.0 * pc;
    let mut b = -3.0 * pa + 3.0 * pb;
    let mut c = pa;

    if approximately(d, 0.0, EPSILON) {
        if approximately(a, 0.0, EPSILON) {
            if approximately(b, 0.0, EPSILON) {
                return Vec::new();
            }
            return vec![-c / b];
        }
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return Vec::new();
        }
        let q = disc.sqrt();
        let a2 = 2.0 * a;
        return vec![(q - b) / a2, (-b - q) / a2];
    }

    a /= d;
    b /= d;
    c /= d;

    let p = (3.0 * b - a * a) / 3.0;
    let p3 = p / 3.0;
    let q = (2.0 * a * a * a - 9.0 * a * b + 27.0 * c) / 27.0;
    let q2 = q / 2.0;
    let discriminant = q2 * q2 + p3 * p3 * p3;

    if discriminant < 0.0 {
        let mp3 = -p / 3.0;
        let r = (mp3 * mp3 * mp3).sqrt();
        let cosphi = (-q / (2.0 * r)).clamp(-1.0, 1.0);
        let phi = cosphi.acos();
        let t1 = 2.0 * crt(r);
        vec![
            t1 * (phi / 3.0).cos() - a / 3.0,
            t1 * ((phi + TAU) / 3.0).cos() - a / 3.0,
            t1 * ((phi + 2.0 * TAU) / 3.0).cos() - a / 3.0,
        ]
    } else if approximately(discriminant, 0.0, EPSILON) {
        let u1 = if q2 < 0.0 { crt(-q2) } else { -crt(q2) };
        vec![2.0 * u1 - a / 3.0, -u1 - a / 3.0]
    } else {
        let sd = discriminant.sqrt();
        let u1 = crt(-q2 + sd);
        let v1 = crt(q2 + sd);
        vec![u1 - v1 - a / 3.0]
    }
}

/// Evaluates a Bernstein polynomial with de Casteljau's algorithm.
#[must_use]
pub fn de_casteljau(values: &[f64], t: f64) -> f64 {
    let mut work = values.to_vec();
    let mt = 1.0 - t;
    for level in (1..work.len()).rev() {
        for i in 0..level {
            work[i] = mt * work[i] + t * work[i + 1];
        }
    }
    work.first().copied().unwrap_or(0.0)
}

/// Roots in `[0, 1]` found by sampling for sign changes and bisecting.
///
/// Roots of even multiplicity that do not change sign are only found when a
/// sample lands on them.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn numeric_roots(values: &[f64]) -> Vec<f64> {
    if values.len() < 2 {
        return Vec::new();
    }
    let samples = MIN_SAMPLES.max(8 * values.len());
    let mut roots = Vec::new();
    let mut prev_t = 0.0;
    let mut prev_v = de_casteljau(values, 0.0);
    if prev_v == 0.0 {
        roots.push(0.0);
    }
    for i in 1..=samples {
        let t = i as f64 / samples as f64;
        let v = de_casteljau(values, t);
        if v == 0.0 {
            roots.push(t);
        } else if prev_v != 0.0 && prev_v.signum() != v.signum() {
            roots.push(bisect(values, prev_t, t, prev_v));
        }
        prev_t = t;
        prev_v = v;
    }
    roots
}

#[allow(clippy::float_cmp)]
fn bisect(values: &[f64], mut lo: f64, mut hi: f64, lo_value: f64) -> f64 {
    let lo_sign = lo_value.signum();
    for _ in 0..BISECTION_STEPS {
        let mid = lo.midpoint(hi);
        let v = de_casteljau(values, mid);
        if v == 0.0 {
            return mid;
        }
        if v.signum() == lo_sign {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo.midpoint(hi)
}
