use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InputError;

/// A tracked body landmark
///
/// `z` and `confidence` are optional because some pose sources omit depth
/// or detection confidence. Absence means "unknown", not zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyPoint {
    /// X coordinate
    pub x: f64,

    /// Y coordinate
    pub y: f64,

    /// Z coordinate (depth)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,

    /// Detection confidence (0.0-1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl KeyPoint {
    /// Create a 2D keypoint with no depth or confidence
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None, confidence: None }
    }

    /// Attach a depth value
    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    /// Attach a detection confidence
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Euclidean distance to another keypoint, treating missing depth as zero
    pub fn distance_to(&self, other: &KeyPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z.unwrap_or(0.0) - other.z.unwrap_or(0.0);
        dx.hypot(dy).hypot(dz)
    }
}

/// One timestamped snapshot of all tracked keypoints
///
/// Keypoint order is positional identity: index `i` is the same landmark
/// in every frame of a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Timestamp in seconds
    pub timestamp: f64,

    /// Body keypoints for this frame
    pub keypoints: Vec<KeyPoint>,
}

impl Frame {
    pub fn new(timestamp: f64, keypoints: Vec<KeyPoint>) -> Self {
        Self { timestamp, keypoints }
    }

    /// Body centre in the image plane (mean x, mean y)
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.keypoints.is_empty() {
            return None;
        }

        let count = self.keypoints.len() as f64;
        let x = self.keypoints.iter().map(|kp| kp.x).sum::<f64>() / count;
        let y = self.keypoints.iter().map(|kp| kp.y).sum::<f64>() / count;
        Some((x, y))
    }
}

/// A recorded performance to be scored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionData {
    /// Sequence of motion frames
    pub frames: Vec<Frame>,

    /// Music tempo in BPM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_bpm: Option<f64>,

    /// Reference motion ID, carried through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_motion: Option<String>,
}

impl MotionData {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            audio_bpm: None,
            reference_motion: None,
        }
    }

    /// Attach a music tempo
    pub fn with_bpm(mut self, bpm: f64) -> Self {
        self.audio_bpm = Some(bpm);
        self
    }

    /// Recording length in seconds, from first to last timestamp
    pub fn duration(&self) -> f64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => (last.timestamp - first.timestamp).max(0.0),
            _ => 0.0,
        }
    }

    /// Check the input contract the analysis engine relies on
    pub fn validate(&self) -> Result<(), InputError> {
        if self.frames.is_empty() {
            return Err(InputError::EmptyFrames);
        }

        if let Some(bpm) = self.audio_bpm {
            if !(bpm.is_finite() && bpm > 0.0) {
                return Err(InputError::InvalidTempo { bpm });
            }
        }

        for (frame_index, frame) in self.frames.iter().enumerate() {
            if !frame.timestamp.is_finite() {
                return Err(InputError::NonFiniteValue {
                    frame_index,
                    field: "timestamp".to_string(),
                });
            }

            if frame.keypoints.is_empty() {
                return Err(InputError::EmptyKeypoints { frame_index });
            }

            for (keypoint_index, kp) in frame.keypoints.iter().enumerate() {
                let coordinates_finite = kp.x.is_finite()
                    && kp.y.is_finite()
                    && kp.z.map_or(true, f64::is_finite);
                if !coordinates_finite {
                    return Err(InputError::NonFiniteValue {
                        frame_index,
                        field: format!("coordinate on keypoint {}", keypoint_index),
                    });
                }

                if let Some(value) = kp.confidence {
                    if !(0.0..=1.0).contains(&value) {
                        return Err(InputError::ConfidenceOutOfRange {
                            frame_index,
                            keypoint_index,
                            value,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// Synchronization of movement peaks against the beat grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingMetrics {
    /// Average lag in milliseconds
    pub avg_lag_ms: f64,

    /// Synchronization score (0.0-1.0)
    pub sync_score: f64,

    /// Percentage of movement peaks on beat (0.0-100.0)
    pub on_beat_percentage: f64,
}

impl TimingMetrics {
    /// Metrics reported when no tempo is available
    pub fn untested() -> Self {
        Self {
            avg_lag_ms: 0.0,
            sync_score: 1.0,
            on_beat_percentage: 100.0,
        }
    }
}

/// Movement quality scores, each within 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementMetrics {
    pub smoothness_score: f64,
    pub accuracy_score: f64,
    pub energy_score: f64,
    pub form_score: f64,
}

/// Feedback category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackCategory {
    Timing,
    Form,
    Energy,
    Accuracy,
    Overall,
}

impl fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Timing => "timing",
            Self::Form => "form",
            Self::Energy => "energy",
            Self::Accuracy => "accuracy",
            Self::Overall => "overall",
        };
        f.write_str(name)
    }
}

/// Feedback severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    /// Reserved; no current rule escalates to critical
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// A single coaching message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub category: FeedbackCategory,
    pub message: String,
    pub severity: Severity,

    /// Moment in the recording the feedback refers to (not set by current rules)
    #[serde(default)]
    pub timestamp: Option<f64>,
}

impl FeedbackItem {
    pub fn new<S: Into<String>>(category: FeedbackCategory, severity: Severity, message: S) -> Self {
        Self {
            category,
            message: message.into(),
            severity,
            timestamp: None,
        }
    }
}

/// Everything produced by one analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionAnalysis {
    pub timing_metrics: TimingMetrics,
    pub movement_metrics: MovementMetrics,
    pub feedback: Vec<FeedbackItem>,
}

/// Full scoring result handed back to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Overall performance score (0.0-100.0)
    pub overall_score: f64,
    pub timing_metrics: TimingMetrics,
    pub movement_metrics: MovementMetrics,
    pub feedback: Vec<FeedbackItem>,

    /// Wall-clock time spent scoring, measured by the caller
    pub processing_time_ms: f64,

    /// Version of the scoring model that produced this result
    pub model_version: String,
}

/// Relative weight of each metric in the overall score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub timing: f64,
    pub smoothness: f64,
    pub accuracy: f64,
    pub energy: f64,
    pub form: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            timing: 0.25,
            smoothness: 0.20,
            accuracy: 0.25,
            energy: 0.15,
            form: 0.15,
        }
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.timing + self.smoothness + self.accuracy + self.energy + self.form
    }
}

/// Metric thresholds that trigger coaching feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackThresholds {
    /// Sync below this warns about timing
    pub sync_warning: f64,

    /// Sync at or above this praises timing
    pub sync_praise: f64,

    /// Smoothness below this warns about jerky movement
    pub smoothness_warning: f64,

    /// Energy below this asks for more intensity
    pub energy_low: f64,

    /// Energy above this praises intensity
    pub energy_high: f64,

    /// Form below this warns about posture
    pub form_warning: f64,

    /// Accuracy below this warns about consistency
    pub accuracy_warning: f64,
}

impl Default for FeedbackThresholds {
    fn default() -> Self {
        Self {
            sync_warning: 0.7,
            sync_praise: 0.9,
            smoothness_warning: 0.6,
            energy_low: 0.5,
            energy_high: 0.9,
            form_warning: 0.7,
            accuracy_warning: 0.7,
        }
    }
}

/// Constants that drive motion analysis
///
/// Defaults reproduce the production scoring model. Override individual
/// fields in tests or through the `[analysis]` section of a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Frame interval assumed when consecutive timestamps do not increase (seconds)
    pub default_frame_interval: f64,

    /// Percentile of the velocity series a peak must exceed
    pub peak_percentile: f64,

    /// Frame interval used to turn peak indices back into times (seconds)
    pub peak_frame_interval: f64,

    /// Maximum distance from the nearest beat for a peak to count as on beat (seconds)
    pub on_beat_window: f64,

    /// Average lag at which the sync score bottoms out (milliseconds)
    pub max_lag_ms: f64,

    /// Acceleration variance that halves the smoothness score
    pub smoothness_variance_scale: f64,

    /// Mean velocity that saturates the energy score
    pub energy_velocity_scale: f64,

    /// Energy reported when no velocities are available
    pub default_energy: f64,

    /// Form reported when no keypoint carries a confidence
    pub default_form: f64,

    pub weights: ScoringWeights,

    pub thresholds: FeedbackThresholds,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_frame_interval: 1.0 / 30.0,
            peak_percentile: 75.0,
            peak_frame_interval: 1.0 / 30.0,
            on_beat_window: 0.1,
            max_lag_ms: 200.0,
            smoothness_variance_scale: 100.0,
            energy_velocity_scale: 10.0,
            default_energy: 0.5,
            default_form: 0.8,
            weights: ScoringWeights::default(),
            thresholds: FeedbackThresholds::default(),
        }
    }
}

impl AnalysisConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.peak_percentile) {
            return Err("Peak percentile must be between 0 and 100".to_string());
        }

        let positives = [
            ("Default frame interval", self.default_frame_interval),
            ("Peak frame interval", self.peak_frame_interval),
            ("On-beat window", self.on_beat_window),
            ("Maximum lag", self.max_lag_ms),
            ("Smoothness variance scale", self.smoothness_variance_scale),
            ("Energy velocity scale", self.energy_velocity_scale),
        ];
        for (name, value) in positives {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{} must be positive", name));
            }
        }

        if !(0.0..=1.0).contains(&self.default_energy) || !(0.0..=1.0).contains(&self.default_form) {
            return Err("Default energy and form must be between 0.0 and 1.0".to_string());
        }

        let w = &self.weights;
        if [w.timing, w.smoothness, w.accuracy, w.energy, w.form].iter().any(|&x| x < 0.0) {
            return Err("Scoring weights cannot be negative".to_string());
        }
        if (w.total() - 1.0).abs() > 1e-6 {
            return Err(format!("Scoring weights must sum to 1.0, got {:.4}", w.total()));
        }

        let t = &self.thresholds;
        let all_thresholds = [
            t.sync_warning,
            t.sync_praise,
            t.smoothness_warning,
            t.energy_low,
            t.energy_high,
            t.form_warning,
            t.accuracy_warning,
        ];
        if all_thresholds.iter().any(|x| !(0.0..=1.0).contains(x)) {
            return Err("Feedback thresholds must be between 0.0 and 1.0".to_string());
        }
        if t.sync_warning > t.sync_praise {
            return Err("Sync warning threshold cannot exceed the praise threshold".to_string());
        }
        if t.energy_low > t.energy_high {
            return Err("Low energy threshold cannot exceed the high energy threshold".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(timestamp: f64, points: &[(f64, f64)]) -> Frame {
        Frame::new(timestamp, points.iter().map(|&(x, y)| KeyPoint::new(x, y)).collect())
    }

    #[test]
    fn test_keypoint_distance_treats_missing_depth_as_zero() {
        let a = KeyPoint::new(0.0, 0.0);
        let b = KeyPoint::new(3.0, 0.0).with_z(4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_keypoint_distance_does_not_overflow_for_large_coordinates() {
        let a = KeyPoint::new(-1e200, 0.0);
        let b = KeyPoint::new(1e200, 0.0);
        assert_eq!(a.distance_to(&b), 2e200);
    }

    #[test]
    fn test_frame_centroid() {
        let f = frame(0.0, &[(0.0, 0.0), (2.0, 0.0), (1.0, 3.0)]);
        assert_eq!(f.centroid(), Some((1.0, 1.0)));
        assert_eq!(Frame::new(0.0, vec![]).centroid(), None);
    }

    #[test]
    fn test_validate_rejects_empty_frames() {
        let data = MotionData::new(vec![]);
        assert!(matches!(data.validate(), Err(InputError::EmptyFrames)));
    }

    #[test]
    fn test_validate_rejects_bad_confidence_and_tempo() {
        let mut data = MotionData::new(vec![Frame::new(
            0.0,
            vec![KeyPoint::new(0.5, 0.5).with_confidence(1.5)],
        )]);
        assert!(matches!(
            data.validate(),
            Err(InputError::ConfidenceOutOfRange { frame_index: 0, keypoint_index: 0, .. })
        ));

        data.frames[0].keypoints[0].confidence = Some(0.9);
        assert!(data.validate().is_ok());

        data.audio_bpm = Some(0.0);
        assert!(matches!(data.validate(), Err(InputError::InvalidTempo { .. })));
    }

    #[test]
    fn test_validate_rejects_empty_keypoints() {
        let data = MotionData::new(vec![frame(0.0, &[(0.0, 0.0)]), Frame::new(0.1, vec![])]);
        assert!(matches!(data.validate(), Err(InputError::EmptyKeypoints { frame_index: 1 })));
    }

    #[test]
    fn test_motion_data_deserializes_with_optional_fields_absent() {
        let json = r#"{
            "frames": [
                {"timestamp": 0.0, "keypoints": [{"x": 0.5, "y": 0.5}]},
                {"timestamp": 0.033, "keypoints": [{"x": 0.6, "y": 0.5, "z": 0.1, "confidence": 0.9}]}
            ]
        }"#;
        let data: MotionData = serde_json::from_str(json).unwrap();
        assert_eq!(data.frames.len(), 2);
        assert_eq!(data.audio_bpm, None);
        assert_eq!(data.reference_motion, None);
        assert_eq!(data.frames[0].keypoints[0].z, None);
        assert_eq!(data.frames[1].keypoints[0].confidence, Some(0.9));
    }

    #[test]
    fn test_feedback_enums_serialize_lowercase() {
        let item = FeedbackItem::new(FeedbackCategory::Timing, Severity::Warning, "late");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["category"], "timing");
        assert_eq!(json["severity"], "warning");
        assert!(json["timestamp"].is_null());
    }

    #[test]
    fn test_analysis_config_validation() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.weights.total(), 1.0);

        let invalid = AnalysisConfig {
            peak_percentile: 120.0,
            ..Default::default()
        };
        assert!(invalid.validate().is_err());

        let mut unbalanced = AnalysisConfig::default();
        unbalanced.weights.timing = 0.5;
        let err = unbalanced.validate().unwrap_err();
        assert!(err.contains("sum to 1.0"));

        let mut crossed = AnalysisConfig::default();
        crossed.thresholds.energy_low = 0.95;
        assert!(crossed.validate().is_err());
    }
}
