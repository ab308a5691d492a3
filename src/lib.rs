//! # StepFlow Motion
//!
//! Score recorded body-pose sequences for beat timing and movement quality,
//! and turn the scores into coaching feedback.
//!
//! The library consumes already-extracted keypoints (it does no pose
//! estimation) and produces timing metrics, movement-quality metrics, an
//! ordered list of feedback items and a single 0-100 score.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stepflow_motion::{
//!     config::Config,
//!     motion::{Frame, KeyPoint, MotionData},
//!     prediction::PredictionEngine,
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let frames = (0..30)
//!     .map(|i| {
//!         let t = i as f64 / 30.0;
//!         Frame::new(t, vec![KeyPoint::new(0.5 + 0.1 * (t * 6.0).sin(), 0.5).with_confidence(0.9)])
//!     })
//!     .collect();
//!
//! let engine = PredictionEngine::new(Config::default());
//! let result = engine.predict(&MotionData::new(frames).with_bpm(120.0))?;
//!
//! println!("Score: {:.1}/100", result.overall_score);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`motion`] - Kinematics, peak detection, timing and movement analysis,
//!   scoring and feedback
//! - [`prediction`] - Validation, timing and packaging of results
//! - [`config`] - Configuration management
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod motion;
pub mod prediction;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{MotionError, Result},
    motion::{MotionAnalyzer, MotionData, PredictionResult},
    prediction::PredictionEngine,
};
