use serde::{Deserialize, Serialize};

/// Fraction of positions where `predicted` equals `truth`. 0 for empty input.
pub fn accuracy<A: AsRef<str>, B: AsRef<str>>(truth: &[A], predicted: &[B]) -> f64 {
    if truth.is_empty() {
        return 0.0;
    }
    let hits = truth
        .iter()
        .zip(predicted)
        .filter(|(t, p)| t.as_ref() == p.as_ref())
        .count();
    hits as f64 / truth.len() as f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// rows with this true label
    pub support: usize,
}

/// Per-class precision / recall / F1, one entry per label in `labels` order.
/// Undefined ratios (no predictions, no support) are reported as 0.
pub fn per_class<A: AsRef<str>, B: AsRef<str>>(labels: &[String], truth: &[A], predicted: &[B]) -> Vec<ClassMetrics> {
    labels
        .iter()
        .map(|label| {
            let (mut tp, mut fp, mut fn_) = (0usize, 0usize, 0usize);
            for (t, p) in truth.iter().zip(predicted) {
                let (t, p) = (t.as_ref() == label, p.as_ref() == label);
                match (t, p) {
                    (true, true) => tp += 1,
                    (false, true) => fp += 1,
                    (true, false) => fn_ += 1,
                    (false, false) => {}
                }
            }
            let precision = ratio(tp, tp + fp);
            let recall = ratio(tp, tp + fn_);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            ClassMetrics { label: label.clone(), precision, recall, f1, support: tp + fn_ }
        })
        .collect()
}

#[inline]
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}
