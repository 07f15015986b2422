// EcoTrace 🌱 AGPL-3.0 License

//! Error types for the inference library.

use std::fmt;

/// Result type alias for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Main error type for the inference library.
///
/// Loading and predicting fail with distinct variants so callers can decide
/// how much of the failure to surface.
#[derive(Debug)]
pub enum InferenceError {
    /// The model artifact could not be read or deserialized.
    ModelLoadError(String),
    /// The loaded model failed while running inference.
    PredictionError(String),
    /// Invalid configuration provided.
    ConfigError(String),
}

impl InferenceError {
    /// Returns `true` if the error happened while loading the model.
    #[must_use]
    pub const fn is_load_error(&self) -> bool {
        matches!(self, Self::ModelLoadError(_))
    }

    /// Returns `true` if the error happened while running the model.
    #[must_use]
    pub const fn is_prediction_error(&self) -> bool {
        matches!(self, Self::PredictionError(_))
    }
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelLoadError(msg) => write!(f, "Model loading failed: {msg}"),
            Self::PredictionError(msg) => write!(f, "Prediction failed: {msg}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for InferenceError {}
