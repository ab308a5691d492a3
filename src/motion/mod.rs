//! # Motion Analysis Module
//!
//! Scores a recorded sequence of body-pose frames for timing against a
//! musical tempo and for movement quality, and turns the metrics into
//! coaching feedback.
//!
//! ## Core Features
//!
//! - **Kinematics**: per-step mean keypoint velocity and its first difference
//! - **Peak Detection**: percentile-gated local maxima in the velocity series
//! - **Timing Analysis**: peak lag against the beat grid implied by a BPM
//! - **Movement Analysis**: smoothness, energy, accuracy and form scores
//! - **Feedback**: ordered, severity-tagged coaching messages
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stepflow_motion::motion::{MotionAnalyzer, MotionLoader};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let motion_data = MotionLoader::load("take_01.json").await?;
//!
//! let analyzer = MotionAnalyzer::new();
//! let analysis = analyzer.analyze(&motion_data)?;
//! let score = analyzer.calculate_overall_score(&analysis.timing_metrics, &analysis.movement_metrics);
//!
//! println!("Overall score: {:.1}", score);
//! for item in &analysis.feedback {
//!     println!("[{}] {}", item.category, item.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod feedback;
pub mod kinematics;
pub mod loader;
pub mod movement;
pub mod peaks;
pub mod scoring;
pub mod timing;
pub mod types;

pub use analyzer::MotionAnalyzer;
pub use kinematics::Kinematics;
pub use loader::MotionLoader;
pub use types::{
    AnalysisConfig, FeedbackCategory, FeedbackItem, FeedbackThresholds, Frame, KeyPoint,
    MotionAnalysis, MotionData, MovementMetrics, PredictionResult, ScoringWeights, Severity,
    TimingMetrics,
};
