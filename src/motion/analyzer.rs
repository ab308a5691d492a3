use tracing::{debug, warn};

use crate::error::{AnalysisError, InputError, Result};
use crate::motion::{
    feedback::generate_feedback,
    movement::analyze_movement,
    scoring,
    timing::analyze_timing,
    types::{AnalysisConfig, MotionAnalysis, MotionData, MovementMetrics, TimingMetrics},
};

/// Scores a pose sequence for beat timing and movement quality
///
/// The analyzer holds only its constants; every call is independent and
/// can run in parallel with any other.
#[derive(Debug, Clone)]
pub struct MotionAnalyzer {
    config: AnalysisConfig,
}

impl MotionAnalyzer {
    /// Create a new analyzer with default configuration
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    /// Create a new analyzer with custom configuration
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Compute timing metrics, movement metrics and coaching feedback
    ///
    /// Fails for an empty frame list, an invalid configuration, or coordinates
    /// so large that a metric overflows; any other input produces a result,
    /// using documented defaults where data is missing.
    pub fn analyze(&self, motion_data: &MotionData) -> Result<MotionAnalysis> {
        self.config
            .validate()
            .map_err(|details| AnalysisError::InvalidParameters { details })?;

        if motion_data.frames.is_empty() {
            return Err(InputError::EmptyFrames.into());
        }

        debug!(
            "Analyzing {} frames ({:.2}s), tempo: {:?}",
            motion_data.frames.len(),
            motion_data.duration(),
            motion_data.audio_bpm
        );

        let frames = &motion_data.frames;
        let (timing_metrics, movement_metrics) = rayon::join(
            || analyze_timing(frames, motion_data.audio_bpm, &self.config),
            || analyze_movement(frames, &self.config),
        );

        debug!(
            "Timing: sync {:.3}, lag {:.1}ms, on beat {:.1}%",
            timing_metrics.sync_score, timing_metrics.avg_lag_ms, timing_metrics.on_beat_percentage
        );
        debug!(
            "Movement: smoothness {:.3}, accuracy {:.3}, energy {:.3}, form {:.3}",
            movement_metrics.smoothness_score,
            movement_metrics.accuracy_score,
            movement_metrics.energy_score,
            movement_metrics.form_score
        );

        ensure_finite(&timing_metrics, &movement_metrics)?;

        let feedback = generate_feedback(&timing_metrics, &movement_metrics, &self.config.thresholds);

        Ok(MotionAnalysis {
            timing_metrics,
            movement_metrics,
            feedback,
        })
    }

    /// Overall performance score (0-100) from the two metric bundles
    pub fn calculate_overall_score(&self, timing: &TimingMetrics, movement: &MovementMetrics) -> f64 {
        scoring::overall_score(timing, movement, &self.config.weights)
    }
}

fn ensure_finite(timing: &TimingMetrics, movement: &MovementMetrics) -> Result<()> {
    let metrics = [
        ("avg_lag_ms", timing.avg_lag_ms),
        ("sync_score", timing.sync_score),
        ("on_beat_percentage", timing.on_beat_percentage),
        ("smoothness_score", movement.smoothness_score),
        ("accuracy_score", movement.accuracy_score),
        ("energy_score", movement.energy_score),
        ("form_score", movement.form_score),
    ];

    match metrics.iter().find(|(_, value)| !value.is_finite()) {
        Some((metric, value)) => {
            warn!("Metric {} came out as {}", metric, value);
            Err(AnalysisError::NonFiniteMetric { metric: metric.to_string() }.into())
        }
        None => Ok(()),
    }
}

impl Default for MotionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MotionError;
    use crate::motion::types::{FeedbackCategory, Frame, KeyPoint};

    fn two_frame_motion() -> MotionData {
        MotionData::new(vec![
            Frame::new(0.0, vec![KeyPoint::new(0.0, 0.0)]),
            Frame::new(0.1, vec![KeyPoint::new(1.0, 0.0)]),
        ])
    }

    #[test]
    fn test_two_frame_analysis() {
        let analyzer = MotionAnalyzer::new();
        let analysis = analyzer.analyze(&two_frame_motion()).unwrap();

        assert_eq!(analysis.timing_metrics, TimingMetrics::untested());
        assert_eq!(analysis.movement_metrics.smoothness_score, 1.0);
        assert_eq!(analysis.movement_metrics.energy_score, 1.0);
        assert_eq!(analysis.movement_metrics.accuracy_score, 1.0);
        assert_eq!(analysis.movement_metrics.form_score, 0.8);

        let score = analyzer.calculate_overall_score(&analysis.timing_metrics, &analysis.movement_metrics);
        assert_eq!(score, 97.0);

        // Excellent timing and great energy
        let categories: Vec<_> = analysis.feedback.iter().map(|f| f.category).collect();
        assert_eq!(categories, vec![FeedbackCategory::Timing, FeedbackCategory::Energy]);
    }

    #[test]
    fn test_empty_frames_is_invalid_input() {
        let analyzer = MotionAnalyzer::new();
        let err = analyzer.analyze(&MotionData::new(vec![])).unwrap_err();
        assert!(matches!(err, MotionError::Input(InputError::EmptyFrames)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let analyzer = MotionAnalyzer::with_config(AnalysisConfig {
            energy_velocity_scale: 0.0,
            ..Default::default()
        });
        let err = analyzer.analyze(&two_frame_motion()).unwrap_err();
        assert!(matches!(err, MotionError::Analysis(AnalysisError::InvalidParameters { .. })));
    }

    #[test]
    fn test_huge_coordinates_score_like_normal_ones() {
        // Two keypoints at +-1e200 swap sides every frame
        let left = KeyPoint::new(-1e200, 0.0);
        let right = KeyPoint::new(1e200, 0.0);
        let data = MotionData::new(vec![
            Frame::new(0.0, vec![left, right]),
            Frame::new(0.1, vec![right, left]),
            Frame::new(0.2, vec![left, right]),
        ]);

        let analyzer = MotionAnalyzer::new();
        let analysis = analyzer.analyze(&data).unwrap();
        let movement = analysis.movement_metrics;
        assert_eq!(movement.smoothness_score, 1.0);
        assert_eq!(movement.accuracy_score, 1.0);
        assert_eq!(movement.energy_score, 1.0);
        assert_eq!(movement.form_score, 0.8);

        let score = analyzer.calculate_overall_score(&analysis.timing_metrics, &movement);
        assert_eq!(score, 97.0);
    }

    #[test]
    fn test_overflowing_metrics_are_rejected() {
        // Displacements of 2e308 overflow to infinity, so accelerations are NaN
        let left = KeyPoint::new(-1e308, 0.0);
        let right = KeyPoint::new(1e308, 0.0);
        let data = MotionData::new(vec![
            Frame::new(0.0, vec![left, right]),
            Frame::new(0.1, vec![right, left]),
            Frame::new(0.2, vec![left, right]),
            Frame::new(0.3, vec![right, left]),
        ]);
        assert!(data.validate().is_ok());

        let err = MotionAnalyzer::new().analyze(&data).unwrap_err();
        assert!(matches!(
            err,
            MotionError::Analysis(AnalysisError::NonFiniteMetric { ref metric }) if metric == "smoothness_score"
        ));
    }

    #[test]
    fn test_custom_thresholds_change_feedback() {
        let mut config = AnalysisConfig::default();
        config.thresholds.form_warning = 0.85;

        let analysis = MotionAnalyzer::with_config(config).analyze(&two_frame_motion()).unwrap();
        let categories: Vec<_> = analysis.feedback.iter().map(|f| f.category).collect();
        assert_eq!(
            categories,
            vec![FeedbackCategory::Timing, FeedbackCategory::Energy, FeedbackCategory::Form]
        );
    }
}
