//! Turning raw model scores into a class and a user-facing confidence.

/// Default minimum probability for a confident identification.
pub const DEFAULT_THRESHOLD: f32 = 0.8;

/// Numerically stable softmax.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|v| v / sum).collect()
}

/// Index and score of the highest score. `None` for an empty slice.
pub fn top_class(scores: &[f32]) -> Option<(usize, f32)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(&b.1))
}

/// Strictly above the threshold.
pub fn is_confident(probability: f32, threshold: f32) -> bool {
    probability > threshold
}

/// Probability as a percentage rounded to two decimals, shortest form with at least one
/// fractional digit (`0.875` → `87.5`, `0.93` → `93.0`).
pub fn format_percent(probability: f32) -> String {
    let pct = (f64::from(probability) * 10_000.0).round() / 100.0;
    format!("{:?}", pct)
}
