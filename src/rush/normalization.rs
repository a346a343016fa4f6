use super::curves::clamp01;
use crate::config::settings::NormalizationSettings;

/// Stretches a batch of raw scores across [0, 1] using a percentile window.
/// Batches smaller than `min_batch` are returned unchanged.
pub fn normalize_batch(scores: &[f64], settings: &NormalizationSettings) -> Vec<f64> {
    if scores.len() < settings.min_batch {
        return scores.to_vec();
    }

    let mut sorted: Vec<f64> = scores.iter().map(|&s| clamp01(s)).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let lo = percentile(&sorted, settings.low_percentile);
    let hi = percentile(&sorted, settings.high_percentile);
    let span = (hi - lo).max(settings.epsilon);

    scores.iter().map(|&s| clamp01((clamp01(s) - lo) / span)).collect()
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    let last = sorted.len() - 1;
    let idx = (sorted.len() as f64 * p).floor().max(0.0) as usize;
    sorted[idx.min(last)]
}
