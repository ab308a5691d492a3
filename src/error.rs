use thiserror::Error;

/// Main error type for the StepFlow motion library
#[derive(Error, Debug)]
pub enum MotionError {
    #[error("Invalid motion input: {0}")]
    Input(#[from] InputError),

    #[error("Motion analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised for motion data that does not satisfy the input contract
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Motion data must contain at least one frame")]
    EmptyFrames,

    #[error("Frame {frame_index} must contain at least one keypoint")]
    EmptyKeypoints { frame_index: usize },

    #[error("Keypoint {keypoint_index} in frame {frame_index} has confidence {value} outside [0, 1]")]
    ConfidenceOutOfRange {
        frame_index: usize,
        keypoint_index: usize,
        value: f64,
    },

    #[error("Tempo must be strictly positive, got {bpm} BPM")]
    InvalidTempo { bpm: f64 },

    #[error("Frame {frame_index} has a non-finite {field}")]
    NonFiniteValue { frame_index: usize, field: String },

    #[error("Failed to load motion file: {path}")]
    LoadFailed { path: String },

    #[error("Failed to parse motion file: {path} - {reason}")]
    ParseFailed { path: String, reason: String },
}

/// Analysis-specific errors
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid analysis parameters: {details}")]
    InvalidParameters { details: String },

    #[error("Metric {metric} is not finite; input magnitudes exceed floating point range")]
    NonFiniteMetric { metric: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {key}")]
    MissingKey { key: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using MotionError
pub type Result<T> = std::result::Result<T, MotionError>;

impl MotionError {
    /// Check if this error is recoverable (can be retried)
    ///
    /// Analysis is deterministic, so only failures touching the filesystem
    /// are worth another attempt.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Input(InputError::LoadFailed { .. }) => true,
            _ => false,
        }
    }

    /// Check if this error was caused by the caller's input rather than the engine
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Input(InputError::LoadFailed { path }) => {
                format!("Could not load motion file '{}'. Please check the file exists and is readable.", path)
            }
            Self::Input(InputError::ParseFailed { path, .. }) => {
                format!("Motion file '{}' is not valid motion JSON (expected frames, audio_bpm, reference_motion).", path)
            }
            Self::Input(InputError::EmptyFrames) => {
                "The recording contains no frames. Capture at least one pose frame and try again.".to_string()
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_convert_into_motion_error() {
        let err: MotionError = InputError::EmptyFrames.into();
        assert!(err.is_invalid_input());
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("at least one frame"));
    }

    #[test]
    fn test_load_failures_are_recoverable() {
        let err: MotionError = InputError::LoadFailed { path: "take_01.json".to_string() }.into();
        assert!(err.is_recoverable());
        assert!(err.user_message().contains("take_01.json"));
    }

    #[test]
    fn test_analysis_errors_are_not_input_errors() {
        let err: MotionError = AnalysisError::InvalidParameters {
            details: "peak percentile must be within [0, 100]".to_string(),
        }
        .into();
        assert!(!err.is_invalid_input());
        assert!(err.user_message().contains("peak percentile"));
    }
}
