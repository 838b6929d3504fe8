use tracing::debug;

use super::Bezier;

/// Pieces grow in increments of `1 / REDUCE_STEPS` of their parent segment.
const REDUCE_STEPS: usize = 100;

#[allow(clippy::cast_precision_loss)]
fn step_to_t(step: usize) -> f64 {
    step as f64 / REDUCE_STEPS as f64
}

impl Bezier {
    /// Splits the curve into simple pieces.
    ///
    /// The curve is first cut at its extrema, then each part is walked in
    /// fixed steps, growing a piece until it stops being simple. Pieces keep
    /// their parameter range on this curve in [`parameter_range`](Self::parameter_range).
    ///
    /// Returns an empty list if some piece is not simple even at a single
    /// step.
    #[must_use]
    pub fn reduce(&self) -> Vec<Bezier> {
        let mut cuts = self.extrema().values.clone();
        if cuts.first().is_none_or(|&t| t > 0.0) {
            cuts.insert(0, 0.0);
        }
        if cuts.last().is_none_or(|&t| t < 1.0) {
            cuts.push(1.0);
        }
        let first_pass = cuts.windows(2).map(|w| self.split_range(w[0], w[1]));

        let mut pieces = Vec::new();
        for part in first_pass {
            let mut from = 0;
            let mut to = 1;
            while to <= REDUCE_STEPS {
                let candidate = part.split_range(step_to_t(from), step_to_t(to));
                if !candidate.is_simple() {
                    to -= 1;
                    if to == from {
                        debug!(
                            t_min = part.domain.t_min,
                            t_max = part.domain.t_max,
                            "no simple piece fits in a single reduction step"
                        );
                        return Vec::new();
                    }
                    pieces.push(part.split_range(step_to_t(from), step_to_t(to)));
                    from = to;
                }
                to += 1;
            }
            if from < REDUCE_STEPS {
                pieces.push(part.split_range(step_to_t(from), 1.0));
            }
        }
        pieces
    }
}
