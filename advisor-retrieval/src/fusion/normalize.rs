//! Min-max normalization of a single score list.

/// Normalize raw scores to [0, 1].
///
/// A list whose max equals its min maps every positive score to 1.0 and
/// zero scores to 0.0. Non-finite scores normalize to 0.0.
pub fn min_max(scores: &[f64]) -> Vec<f64> {
    let finite = scores.iter().copied().filter(|s| s.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
        (lo.min(s), hi.max(s))
    });
    if !min.is_finite() || !max.is_finite() {
        return vec![0.0; scores.len()];
    }

    let range = max - min;
    scores
        .iter()
        .map(|&s| {
            if !s.is_finite() {
                0.0
            } else if range <= f64::EPSILON {
                if s > 0.0 {
                    1.0
                } else {
                    0.0
                }
            } else {
                ((s - min) / range).clamp(0.0, 1.0)
            }
        })
        .collect()
}
