use std::path::Path;

use tracing::debug;

use crate::error::{InputError, Result};
use crate::motion::types::MotionData;

/// Loads recorded motion from JSON documents
pub struct MotionLoader;

impl MotionLoader {
    /// Load a motion recording from a JSON file
    ///
    /// The document has the shape `{ "frames": [...], "audio_bpm": 120.0,
    /// "reference_motion": "..." }`, with the last two fields optional.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<MotionData> {
        let path = path.as_ref();

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|_| InputError::LoadFailed {
                path: path.display().to_string(),
            })?;

        let motion_data = Self::from_json(&content).map_err(|e| InputError::ParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        debug!("Loaded {} frames from {:?}", motion_data.frames.len(), path);
        Ok(motion_data)
    }

    /// Parse a motion recording from a JSON string
    pub fn from_json(content: &str) -> std::result::Result<MotionData, serde_json::Error> {
        serde_json::from_str(content)
    }
}
