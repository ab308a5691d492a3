/// Value at percentile `p` (0-100) using linear interpolation between order statistics
///
/// Returns `None` for an empty series.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Find movement peaks in a velocity series
///
/// A sample is a peak when it exceeds the `threshold_percentile` of the
/// whole series and is strictly greater than both neighbours. Peak times
/// are reconstructed as `index * frame_interval`, assuming evenly spaced
/// samples regardless of the recording's real timestamps.
pub fn detect_peaks(velocities: &[f64], threshold_percentile: f64, frame_interval: f64) -> Vec<f64> {
    if velocities.len() < 3 {
        return Vec::new();
    }

    let threshold = match percentile(velocities, threshold_percentile) {
        Some(t) => t,
        None => return Vec::new(),
    };

    velocities
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[1] > threshold && w[1] > w[0] && w[1] > w[2])
        .map(|(i, _)| (i + 1) as f64 * frame_interval)
        .collect()
}
