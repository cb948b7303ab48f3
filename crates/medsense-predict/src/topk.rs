//! Top-k selection over a probability distribution.

use std::cmp::Ordering;

/// Indices of the `k` highest probabilities, highest first.
///
/// Equal probabilities keep index order (stable sort). NaN ranks below
/// every number. Returns `min(k, probs.len())` indices.
pub fn top_k(probs: &[f64], k: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..probs.len()).collect();
    indices.sort_by(|&a, &b| rank_key(probs[b]).partial_cmp(&rank_key(probs[a])).unwrap_or(Ordering::Equal));
    indices.truncate(k);
    indices
}

fn rank_key(p: f64) -> f64 {
    if p.is_nan() { f64::NEG_INFINITY } else { p }
}
