//! Weighted combination of the sub-scores.

/// Weights for grammar, coherence, vocabulary, relevance.
pub const DEFAULT_WEIGHTS: [f64; 4] = [0.3, 0.3, 0.2, 0.2];

/// Weighted mean of `scores`; positions without a weight default to 1.
///
/// Empty input yields 0. No clamping is applied - inputs are already
/// bounded by the analyzers.
#[must_use]
pub fn overall_score(scores: &[f64], weights: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }

    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;
    for (i, score) in scores.iter().enumerate() {
        let weight = weights.get(i).copied().unwrap_or(1.0);
        weighted_sum += score * weight;
        weight_sum += weight;
    }

    weighted_sum / weight_sum
}
