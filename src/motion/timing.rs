use crate::motion::{
    kinematics,
    peaks::detect_peaks,
    types::{AnalysisConfig, Frame, TimingMetrics},
};

/// Score how well movement peaks line up with the beat grid of `audio_bpm`
///
/// Without a tempo there is nothing to test against and the metrics report
/// perfect synchronization. A recording with no detected peaks also reports
/// zero lag and full sync, with 0% of peaks on beat.
pub fn analyze_timing(frames: &[Frame], audio_bpm: Option<f64>, config: &AnalysisConfig) -> TimingMetrics {
    let bpm = match audio_bpm {
        Some(bpm) => bpm,
        None => return TimingMetrics::untested(),
    };

    let velocities = kinematics::velocities(frames, config.default_frame_interval);
    let peaks = detect_peaks(&velocities, config.peak_percentile, config.peak_frame_interval);

    score_against_beat_grid(&peaks, 60.0 / bpm, config)
}

/// Compare peak times against a beat grid with the given interval (seconds)
pub fn score_against_beat_grid(peaks: &[f64], beat_interval: f64, config: &AnalysisConfig) -> TimingMetrics {
    let mut on_beat_count = 0usize;
    let mut lag_sum = 0.0;

    for &peak_time in peaks {
        let nearest_beat = (peak_time / beat_interval).round() * beat_interval;
        let lag = (peak_time - nearest_beat).abs();
        lag_sum += lag;

        if lag < config.on_beat_window {
            on_beat_count += 1;
        }
    }

    let denominator = peaks.len().max(1) as f64;
    let avg_lag_ms = (lag_sum / denominator) * 1000.0;
    let on_beat_percentage = (on_beat_count as f64 / denominator) * 100.0;
    let sync_score = 1.0 - (avg_lag_ms / config.max_lag_ms).min(1.0);

    TimingMetrics {
        avg_lag_ms,
        sync_score,
        on_beat_percentage,
    }
}
