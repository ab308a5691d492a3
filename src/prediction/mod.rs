//! Prediction layer wrapping the motion analyzer: input validation, timing
//! and assembly of [`PredictionResult`](crate::motion::PredictionResult)s.

pub mod engine;

pub use engine::PredictionEngine;
