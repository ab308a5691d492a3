use crate::motion::{
    kinematics::Kinematics,
    types::{AnalysisConfig, Frame, MovementMetrics},
};

/// Compute smoothness, energy, accuracy and form for a frame sequence
pub fn analyze_movement(frames: &[Frame], config: &AnalysisConfig) -> MovementMetrics {
    let kinematics = Kinematics::from_frames(frames, config.default_frame_interval);

    MovementMetrics {
        smoothness_score: smoothness(&kinematics.accelerations, config.smoothness_variance_scale),
        accuracy_score: accuracy(frames),
        energy_score: energy(&kinematics.velocities, config.energy_velocity_scale, config.default_energy),
        form_score: form(frames, config.default_form),
    }
}

/// Inverse jerkiness: `1 / (1 + var(acc) / scale)`
///
/// A series with fewer than two samples carries no variation and scores 1.0.
pub fn smoothness(accelerations: &[f64], variance_scale: f64) -> f64 {
    if accelerations.len() < 2 {
        return 1.0;
    }

    let variance = population_variance(accelerations);
    (1.0 / (1.0 + variance / variance_scale)).clamp(0.0, 1.0)
}

/// Mean velocity normalized by `velocity_scale`
pub fn energy(velocities: &[f64], velocity_scale: f64, default_energy: f64) -> f64 {
    match mean(velocities) {
        Some(avg_velocity) => (avg_velocity / velocity_scale).clamp(0.0, 1.0),
        None => default_energy,
    }
}

/// Consistency of body shape across frames
///
/// For each frame, takes the standard deviation of keypoint distances to the
/// frame's centroid; the average spread maps to `1 / (1 + avg_std)`.
pub fn accuracy(frames: &[Frame]) -> f64 {
    if frames.len() < 2 {
        return 1.0;
    }

    let spreads: Vec<f64> = frames.iter().filter_map(shape_spread).collect();

    match mean(&spreads) {
        Some(avg_std) => (1.0 / (1.0 + avg_std)).clamp(0.0, 1.0),
        None => 1.0,
    }
}

/// Mean detection confidence over every keypoint that reports one
///
/// Confidences are averaged per frame first, then across frames. Falls back
/// to `default_form` when no keypoint carries a confidence.
pub fn form(frames: &[Frame], default_form: f64) -> f64 {
    if frames.is_empty() {
        return 1.0;
    }

    let frame_scores: Vec<f64> = frames
        .iter()
        .filter_map(|frame| {
            let confidences: Vec<f64> = frame.keypoints.iter().filter_map(|kp| kp.confidence).collect();
            mean(&confidences)
        })
        .collect();

    match mean(&frame_scores) {
        Some(score) => score.clamp(0.0, 1.0),
        None => default_form,
    }
}

/// Standard deviation of keypoint distances to the frame centroid
fn shape_spread(frame: &Frame) -> Option<f64> {
    let (cx, cy) = frame.centroid()?;

    let distances: Vec<f64> = frame
        .keypoints
        .iter()
        .map(|kp| (kp.x - cx).hypot(kp.y - cy))
        .collect();

    Some(population_variance(&distances).sqrt())
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn population_variance(values: &[f64]) -> f64 {
    match mean(values) {
        Some(m) => values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64,
        None => 0.0,
    }
}
