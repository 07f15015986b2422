// EcoTrace 🌱 AGPL-3.0 License

//! Linear regressor artifacts stored as JSON.
//!
//! The artifact holds the fitted parameters of an ordinary least squares
//! model:
//!
//! ```json
//! {
//!   "coefficients": [25.4, 12.1],
//!   "intercept": 48.0,
//!   "feature_names": ["engine_size", "mileage"],
//!   "description": "CO2 g/km regressor"
//! }
//! ```

use std::fs;
use std::path::Path;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{InferenceError, Result};

/// Fitted linear regression parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// One weight per input feature.
    pub coefficients: Vec<f64>,
    /// Bias term.
    #[serde(default)]
    pub intercept: f64,
    /// Feature names in column order, if the exporter recorded them.
    #[serde(default)]
    pub feature_names: Vec<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

impl LinearModel {
    /// Create a model from its parameters.
    #[must_use]
    pub const fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
            feature_names: Vec::new(),
            description: None,
        }
    }

    /// Read and deserialize a JSON artifact.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ModelLoadError`] if the file can't be read or
    /// isn't a valid linear model.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            InferenceError::ModelLoadError(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&contents)
    }

    /// Deserialize a linear model from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ModelLoadError`] on malformed JSON, an empty
    /// coefficient list, or non-finite parameters.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json)
            .map_err(|e| InferenceError::ModelLoadError(format!("Invalid linear model: {e}")))?;

        if model.coefficients.is_empty() {
            return Err(InferenceError::ModelLoadError(
                "Invalid linear model: no coefficients".to_string(),
            ));
        }
        if !model.intercept.is_finite() || model.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(InferenceError::ModelLoadError(
                "Invalid linear model: non-finite parameter".to_string(),
            ));
        }
        if !model.feature_names.is_empty() && model.feature_names.len() != model.coefficients.len()
        {
            return Err(InferenceError::ModelLoadError(format!(
                "Invalid linear model: {} feature names for {} coefficients",
                model.feature_names.len(),
                model.coefficients.len()
            )));
        }

        Ok(model)
    }

    /// Number of features the model expects per row.
    #[must_use]
    pub fn num_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Predict one value per row of `x`.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::PredictionError`] if `x` holds NaN or
    /// infinite values, or its column count doesn't match the number of
    /// coefficients.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        check_finite(x)?;
        if x.ncols() != self.num_features() {
            return Err(InferenceError::PredictionError(format!(
                "X has {} features, but the model is expecting {} features as input",
                x.ncols(),
                self.num_features()
            )));
        }

        let weights = Array1::from(self.coefficients.clone());
        Ok(x.dot(&weights) + self.intercept)
    }
}

/// Reject inputs holding NaN or infinite values.
///
/// # Errors
///
/// Returns [`InferenceError::PredictionError`] naming the offending kind of
/// value.
pub fn check_finite(x: &Array2<f64>) -> Result<()> {
    if x.iter().any(|v| v.is_nan()) {
        return Err(InferenceError::PredictionError("Input X contains NaN.".to_string()));
    }
    if x.iter().any(|v| v.is_infinite()) {
        return Err(InferenceError::PredictionError(
            "Input X contains infinity or a value too large for dtype('float64').".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_predict() {
        let model = LinearModel::new(vec![10.0, 5.0], 100.0);
        let y = model.predict(&array![[2.0, 11.0], [0.0, 0.0]]).unwrap();
        assert_eq!(y.len(), 2);
        assert!((y[0] - 175.0).abs() < 1e-9);
        assert!((y[1] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_predict_feature_mismatch() {
        let model = LinearModel::new(vec![1.0, 2.0, 3.0], 0.0);
        let err = model.predict(&array![[2.0, 11.0]]).unwrap_err();
        assert!(err.is_prediction_error());
        assert!(err.to_string().contains("expecting 3 features"));
    }

    #[test]
    fn test_predict_rejects_non_finite() {
        let model = LinearModel::new(vec![10.0, 5.0], 100.0);

        let err = model.predict(&array![[f64::NAN, 11.0]]).unwrap_err();
        assert!(err.is_prediction_error());
        assert!(err.to_string().ends_with("Input X contains NaN."));

        let err = model.predict(&array![[2.0, f64::NEG_INFINITY]]).unwrap_err();
        assert!(err.to_string().contains("Input X contains infinity"));
    }

    #[test]
    fn test_from_json_defaults() {
        let model = LinearModel::from_json_str(r#"{"coefficients": [1.5, -0.5]}"#).unwrap();
        assert_eq!(model.num_features(), 2);
        assert!(model.intercept.abs() < f64::EPSILON);
        assert!(model.feature_names.is_empty());
        assert!(model.description.is_none());
    }

    #[test]
    fn test_from_json_rejects_bad_artifacts() {
        for json in [
            "not json",
            r#"{"intercept": 1.0}"#,
            r#"{"coefficients": []}"#,
            r#"{"coefficients": [1.0, 2.0], "feature_names": ["engine_size"]}"#,
        ] {
            let err = LinearModel::from_json_str(json).unwrap_err();
            assert!(err.is_load_error(), "expected load error for {json}");
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = LinearModel::load("does/not/exist.json").unwrap_err();
        assert!(err.is_load_error());
    }
}
