// EcoTrace 🌱 AGPL-3.0 License

//! Regression model loading and inference.
//!
//! This module provides [`RegressionModel`], which loads a serialized
//! regressor from disk and predicts a single value from a [`FeatureVector`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ndarray::Array2;
#[cfg(feature = "coreml")]
use ort::execution_providers::CoreMLExecutionProvider;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::tensor::TensorElementType;
use ort::value::{DynValue, TensorRef};

use crate::error::{InferenceError, Result};
use crate::features::FeatureVector;
use crate::format::ModelFormat;
use crate::inference::InferenceConfig;
use crate::linear::{self, LinearModel};
use crate::metadata::ModelMetadata;

/// ONNX graph metadata keys read into [`ModelMetadata`].
const METADATA_KEYS: [&str; 2] = ["description", "feature_names"];

/// Loaded model backend.
enum Backend {
    Onnx(OnnxRegressor),
    Linear(LinearModel),
}

/// Floating point element types an ONNX regressor can be driven with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputPrecision {
    F32,
    F64,
}

/// ONNX Runtime session plus the tensor names it is driven through.
struct OnnxRegressor {
    session: Session,
    input_name: String,
    input_precision: InputPrecision,
    output_name: String,
}

/// A regression model loaded from a file.
///
/// # Example
///
/// ```no_run
/// use ecotrace_inference::{FeatureVector, RegressionModel};
///
/// let mut model = RegressionModel::load("co2_model.onnx")?;
/// let raw = model.predict(&FeatureVector::new(2.0, 11.0))?;
/// println!("{raw}");
/// # Ok::<(), ecotrace_inference::InferenceError>(())
/// ```
pub struct RegressionModel {
    backend: Backend,
    metadata: ModelMetadata,
    path: PathBuf,
}

impl RegressionModel {
    /// Load a model, picking the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ModelLoadError`] if the file doesn't exist,
    /// has an unsupported extension, or can't be deserialized.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_config(path, &InferenceConfig::default())
    }

    /// Load a model with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ModelLoadError`] if the file doesn't exist,
    /// has an unsupported extension, or can't be deserialized.
    pub fn load_with_config<P: AsRef<Path>>(path: P, config: &InferenceConfig) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(InferenceError::ModelLoadError(format!(
                "Model file not found: {}",
                path.display()
            )));
        }

        let format = ModelFormat::from_path(path)
            .map_err(|e| InferenceError::ModelLoadError(e.to_string()))?;

        let (backend, metadata) = match format {
            ModelFormat::Onnx => {
                let (regressor, metadata) = OnnxRegressor::load(path, config)?;
                (Backend::Onnx(regressor), metadata)
            }
            ModelFormat::Linear => {
                let linear = LinearModel::load(path)?;
                let metadata = ModelMetadata::from_linear(&linear);
                (Backend::Linear(linear), metadata)
            }
        };

        Ok(Self {
            backend,
            metadata,
            path: path.to_path_buf(),
        })
    }

    /// Run the model on a single feature vector and return the first output.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::PredictionError`] if a feature is NaN or
    /// infinite, the model rejects the input, or it produces no output.
    pub fn predict(&mut self, features: &FeatureVector) -> Result<f64> {
        let x = features.to_array();
        linear::check_finite(&x)?;

        let outputs = match &mut self.backend {
            Backend::Onnx(regressor) => regressor.run(features)?,
            Backend::Linear(linear) => linear.predict(&x)?.to_vec(),
        };

        outputs.first().copied().ok_or_else(|| {
            InferenceError::PredictionError("Model returned an empty output".to_string())
        })
    }

    /// Get the artifact format.
    #[must_use]
    pub const fn format(&self) -> ModelFormat {
        self.metadata.format
    }

    /// Get the model metadata.
    #[must_use]
    pub const fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Get the path the model was loaded from.
    #[must_use]
    pub fn model_path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for RegressionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegressionModel")
            .field("format", &self.metadata.format)
            .field("path", &self.path)
            .field("features", &self.metadata.feature_names)
            .finish_non_exhaustive()
    }
}

impl OnnxRegressor {
    fn load(path: &Path, config: &InferenceConfig) -> Result<(Self, ModelMetadata)> {
        #[allow(unused_mut)]
        let mut builder = Session::builder().map_err(|e| {
            InferenceError::ModelLoadError(format!("Failed to create session builder: {e}"))
        })?;

        #[cfg(feature = "coreml")]
        {
            builder = builder
                .with_execution_providers([CoreMLExecutionProvider::default().build()])
                .map_err(|e| {
                    InferenceError::ModelLoadError(format!("Failed to register CoreML EP: {e}"))
                })?;
        }

        let session = builder
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| {
                InferenceError::ModelLoadError(format!("Failed to set optimization level: {e}"))
            })?
            .with_intra_threads(config.num_threads)
            .map_err(|e| {
                InferenceError::ModelLoadError(format!("Failed to set intra-thread count: {e}"))
            })?
            .commit_from_file(path)
            .map_err(|e| InferenceError::ModelLoadError(format!("Failed to load model: {e}")))?;

        let input = session
            .inputs
            .first()
            .ok_or_else(|| InferenceError::ModelLoadError("Model has no inputs".to_string()))?;
        let input_name = input.name.clone();
        let input_precision = match input.input_type.tensor_type() {
            Some(TensorElementType::Float32) => InputPrecision::F32,
            Some(TensorElementType::Float64) => InputPrecision::F64,
            other => {
                return Err(InferenceError::ModelLoadError(format!(
                    "Unsupported input '{input_name}': expected a float or double tensor, got {other:?}"
                )));
            }
        };

        // skl2onnx names the regression output "variable"
        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name == "variable")
            .or_else(|| session.outputs.first())
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError::ModelLoadError("Model has no outputs".to_string()))?;

        let (producer, properties) = Self::read_metadata(&session)?;
        let metadata = ModelMetadata::from_onnx_properties(
            input_name.clone(),
            output_name.clone(),
            producer,
            &properties,
        );

        Ok((
            Self {
                session,
                input_name,
                input_precision,
                output_name,
            },
            metadata,
        ))
    }

    fn read_metadata(session: &Session) -> Result<(Option<String>, HashMap<String, String>)> {
        let model_metadata = session.metadata().map_err(|e| {
            InferenceError::ModelLoadError(format!("Failed to get model metadata: {e}"))
        })?;

        let producer = model_metadata.producer().ok();

        let mut properties = HashMap::new();
        for key in &METADATA_KEYS {
            if let Ok(Some(value)) = model_metadata.custom(key) {
                properties.insert((*key).to_string(), value);
            }
        }

        Ok((producer, properties))
    }

    fn run(&mut self, features: &FeatureVector) -> Result<Vec<f64>> {
        match self.input_precision {
            InputPrecision::F32 => self.run_with(&features.to_array_f32()),
            InputPrecision::F64 => self.run_with(&features.to_array()),
        }
    }

    fn run_with<T>(&mut self, input: &Array2<T>) -> Result<Vec<f64>>
    where
        T: ort::tensor::PrimitiveTensorElementType + Clone + std::fmt::Debug + 'static,
    {
        let input_contiguous = input.as_standard_layout();

        let input_tensor = TensorRef::from_array_view(&input_contiguous).map_err(|e| {
            InferenceError::PredictionError(format!("Failed to create input tensor: {e}"))
        })?;

        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let outputs = self
            .session
            .run(inputs)
            .map_err(|e| InferenceError::PredictionError(format!("Inference failed: {e}")))?;

        let output = outputs.get(self.output_name.as_str()).ok_or_else(|| {
            InferenceError::PredictionError(format!("Output '{}' not found", self.output_name))
        })?;

        extract_values(output)
    }
}

/// Read a float or double output tensor as `f64` values.
fn extract_values(output: &DynValue) -> Result<Vec<f64>> {
    match output.dtype().tensor_type() {
        Some(TensorElementType::Float32) => {
            let (_, data) = output.try_extract_tensor::<f32>().map_err(|e| {
                InferenceError::PredictionError(format!("Failed to extract output: {e}"))
            })?;
            Ok(data.iter().map(|&v| f64::from(v)).collect())
        }
        Some(TensorElementType::Float64) => {
            let (_, data) = output.try_extract_tensor::<f64>().map_err(|e| {
                InferenceError::PredictionError(format!("Failed to extract output: {e}"))
            })?;
            Ok(data.to_vec())
        }
        other => Err(InferenceError::PredictionError(format!(
            "Unsupported output type {other:?}, expected a float or double tensor"
        ))),
    }
}
