//! 24-point Gauss–Legendre quadrature on `[0, 1]`.

/// Positive abscissae on `[-1, 1]` with their weights. Each node is used
/// together with its mirror image.
const NODES: [(f64, f64); 12] = [
    (0.064_056_892_862_605_63, 0.127_938_195_346_752_16),
    (0.191_118_867_473_616_3, 0.125_837_456_346_828_3),
    (0.315_042_679_696_163_4, 0.121_670_472_927_803_39),
    (0.433_793_507_626_045_1, 0.115_505_668_053_725_6),
    (0.545_421_471_388_839_6, 0.107_444_270_115_965_63),
    (0.648_093_651_936_975_5, 0.097_618_652_104_113_88),
    (0.740_124_191_578_554_4, 0.086_190_161_531_953_27),
    (0.820_001_985_973_903, 0.073_346_481_411_080_3),
    (0.886_415_527_004_401_1, 0.059_298_584_915_436_78),
    (0.938_274_552_002_732_8, 0.044_277_438_817_419_81),
    (0.974_728_555_971_309_5, 0.028_531_388_628_933_663),
    (0.995_187_219_997_021_3, 0.012_341_229_799_987_2),
];

/// Integrates `f` over `[0, 1]`.
///
/// Terms are accumulated with compensated summation.
pub(super) fn integrate(f: impl Fn(f64) -> f64) -> f64 {
    const Z: f64 = 0.5;
    let mut sum = 0.0;
    let mut compensation = 0.0;
    for &(x, w) in &NODES {
        for node in [-x, x] {
            let term = w * f(node.mul_add(Z, Z));
            let y = term - compensation;
            let next = sum + y;
            compensation = (next - sum) - y;
            sum = next;
        }
    }
    Z * sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_interval_length() {
        let total: f64 = NODES.iter().map(|&(_, w)| 2.0 * w).sum();
        assert!((total - 2.0).abs() < 1e-14, "total={total}");
    }

    #[test]
    fn integrates_polynomials_exactly() {
        // Exact for degree <= 47.
        let v = integrate(|t| t.powi(7));
        assert!((v - 0.125).abs() < 1e-14, "v={v}");
        let v = integrate(|t| 3.0 * t * t);
        assert!((v - 1.0).abs() < 1e-14, "v={v}");
    }
}
