// EcoTrace 🌱 AGPL-3.0 License

//! End-to-end prediction: load the artifact, run it, rescale the output.
//!
//! The model is loaded fresh for every call; nothing is cached between
//! predictions.

use std::path::Path;

use crate::error::Result;
use crate::features::FeatureVector;
use crate::inference::InferenceConfig;
use crate::model::RegressionModel;
use crate::postprocessing::Prediction;

/// Load the model at `model_path` and return its raw prediction for
/// `[[engine_size, mileage]]`.
///
/// # Errors
///
/// [`InferenceError::ModelLoadError`](crate::InferenceError::ModelLoadError)
/// if the artifact can't be loaded,
/// [`InferenceError::PredictionError`](crate::InferenceError::PredictionError)
/// if inference fails.
pub fn predict<P: AsRef<Path>>(engine_size: f64, mileage: f64, model_path: P) -> Result<f64> {
    Predictor::default()
        .predict_raw(&FeatureVector::new(engine_size, mileage), model_path)
}

/// Runs load → predict → rescale with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Predictor {
    config: InferenceConfig,
}

impl Predictor {
    /// Create a predictor.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ConfigError`](crate::InferenceError::ConfigError)
    /// if the configuration is invalid.
    pub fn new(config: InferenceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Load the model and return its raw output.
    ///
    /// # Errors
    ///
    /// Load and inference failures, see [`predict`].
    pub fn predict_raw<P: AsRef<Path>>(
        &self,
        features: &FeatureVector,
        model_path: P,
    ) -> Result<f64> {
        let mut model = RegressionModel::load_with_config(model_path, &self.config)?;
        model.predict(features)
    }

    /// Load the model, predict, and rescale the output.
    ///
    /// # Errors
    ///
    /// Load and inference failures, see [`predict`].
    pub fn predict<P: AsRef<Path>>(
        &self,
        features: &FeatureVector,
        model_path: P,
    ) -> Result<Prediction> {
        let raw = self.predict_raw(features, model_path)?;
        Ok(Prediction::from_raw(raw, &self.config))
    }

    /// Rescale the output of an already loaded model.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::PredictionError`](crate::InferenceError::PredictionError)
    /// if inference fails.
    pub fn predict_with(
        &self,
        model: &mut RegressionModel,
        features: &FeatureVector,
    ) -> Result<Prediction> {
        let raw = model.predict(features)?;
        Ok(Prediction::from_raw(raw, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InferenceError;
    use std::io::Write;

    fn linear_artifact(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_predict_raw() {
        let file = linear_artifact(r#"{"coefficients": [20.0, 10.0], "intercept": 5.0}"#);
        let raw = predict(2.0, 11.0, file.path()).unwrap();
        assert!((raw - 155.0).abs() < 1e-9);
    }

    #[test]
    fn test_predict_rescaled() {
        let file = linear_artifact(r#"{"coefficients": [20.0, 10.0], "intercept": 5.0}"#);
        let prediction = Predictor::default()
            .predict(&FeatureVector::new(2.0, 11.0), file.path())
            .unwrap();
        assert_eq!(prediction.to_string(), "0.155");
    }

    #[test]
    fn test_predict_missing_model() {
        let err = predict(2.0, 11.0, "missing/final_model.onnx").unwrap_err();
        assert!(matches!(err, InferenceError::ModelLoadError(_)));
    }

    #[test]
    fn test_predict_wrong_shape() {
        let file = linear_artifact(r#"{"coefficients": [1.0]}"#);
        let err = predict(2.0, 11.0, file.path()).unwrap_err();
        assert!(matches!(err, InferenceError::PredictionError(_)));
    }

    #[test]
    fn test_invalid_config() {
        let err = Predictor::new(InferenceConfig::new().with_scale(0.0)).unwrap_err();
        assert!(matches!(err, InferenceError::ConfigError(_)));
    }

    #[test]
    fn test_predict_with_loaded_model() {
        let file = linear_artifact(r#"{"coefficients": [0.0, 0.0], "intercept": 2000.0}"#);
        let mut model = RegressionModel::load(file.path()).unwrap();
        let predictor = Predictor::new(InferenceConfig::new()).unwrap();
        let first = predictor.predict_with(&mut model, &FeatureVector::new(1.0, 1.0)).unwrap();
        let second = predictor.predict_with(&mut model, &FeatureVector::new(1.0, 1.0)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), "2.0");
    }
}
