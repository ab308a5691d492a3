use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::Result,
    motion::{MotionAnalyzer, MotionData, MotionLoader, PredictionResult},
};

/// Scores recordings end to end and packages the results
///
/// The engine follows a clear pipeline:
/// 1. Validation - reject recordings that break the input contract
/// 2. Analysis - timing and movement metrics plus coaching feedback
/// 3. Scoring - weighted overall score
/// 4. Packaging - attach processing time and model version
pub struct PredictionEngine {
    config: Config,
    analyzer: MotionAnalyzer,
}

impl PredictionEngine {
    /// Create a new prediction engine with the given configuration
    pub fn new(config: Config) -> Self {
        let analyzer = MotionAnalyzer::with_config(config.analysis.clone());
        Self { config, analyzer }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validate, analyze and score a single recording
    pub fn predict(&self, motion_data: &MotionData) -> Result<PredictionResult> {
        let start = Instant::now();

        motion_data.validate().map_err(|e| {
            warn!("Rejected motion data: {}", e);
            e
        })?;

        if let Some(reference) = &motion_data.reference_motion {
            debug!("Reference motion '{}' attached but not compared", reference);
        }

        let analysis = self.analyzer.analyze(motion_data)?;
        let overall_score = self
            .analyzer
            .calculate_overall_score(&analysis.timing_metrics, &analysis.movement_metrics);

        let processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        info!(
            "Scored {} frames: {:.1}/100, {} feedback items in {:.2}ms",
            motion_data.frames.len(),
            overall_score,
            analysis.feedback.len(),
            processing_time_ms
        );

        Ok(PredictionResult {
            overall_score,
            timing_metrics: analysis.timing_metrics,
            movement_metrics: analysis.movement_metrics,
            feedback: analysis.feedback,
            processing_time_ms,
            model_version: self.config.output.model_version.clone(),
        })
    }

    /// Load a recording from a JSON file and score it
    pub async fn predict_file<P: AsRef<Path>>(&self, path: P) -> Result<PredictionResult> {
        let motion_data = MotionLoader::load(path).await?;
        self.predict(&motion_data)
    }

    /// Score independent recordings in parallel, preserving input order
    pub fn predict_batch(&self, recordings: &[MotionData]) -> Vec<Result<PredictionResult>> {
        debug!("Scoring batch of {} recordings", recordings.len());
        recordings.par_iter().map(|data| self.predict(data)).collect()
    }
}

impl Default for PredictionEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
