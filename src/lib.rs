// EcoTrace 🌱 AGPL-3.0 License

#![allow(clippy::multiple_crate_versions)]

//! # EcoTrace Inference
//!
//! Vehicle CO2 regression inference. Loads a trained regressor from disk,
//! predicts from engine size and mileage, and rescales the result for display.
//!
//! ## Quick Start (Library)
//!
//! ```no_run
//! use ecotrace_inference::{FeatureVector, InferenceConfig, Predictor};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let predictor = Predictor::new(InferenceConfig::default())?;
//!     let prediction = predictor.predict(&FeatureVector::new(2.0, 11.0), "co2_model.onnx")?;
//!     println!("{prediction}");
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # engine size, mileage, model path
//! ecotrace-inference 2.0 11 co2_model.onnx
//! 0.159
//!
//! # model details and timing on stderr
//! ecotrace-inference 1.6 10.1 co2_linear.json --verbose
//! ```
//!
//! Exit code `1` means the command line was wrong (argument count or a
//! non-numeric value). A model that fails to load or predict prints a
//! diagnostic followed by `An error occurred during prediction` and exits `0`.
//!
//! ## Model Formats
//!
//! | Extension | Format | Runtime |
//! |-----------|--------|---------|
//! | `.onnx` | ONNX graph, one `[N, 2]` float input | ONNX Runtime |
//! | `.json` | Linear regressor coefficients and intercept | built-in |
//!
//! Export a scikit-learn regressor with `skl2onnx`:
//!
//! ```python
//! from skl2onnx import to_onnx
//! onx = to_onnx(model, X_train[:1].astype("float32"))
//! open("co2_model.onnx", "wb").write(onx.SerializeToString())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`model`] | [`RegressionModel`] loading and inference |
//! | [`predictor`] | [`Predictor`] load → predict → rescale pipeline |
//! | [`postprocessing`] | Rescaling, rounding and [`Prediction`] formatting |
//! | [`features`] | [`FeatureVector`] model input |
//! | [`vehicle`] | Make and body type to feature lookup |
//! | [`linear`] | JSON linear regressor artifacts |
//! | [`metadata`] | [`ModelMetadata`] |
//! | [`inference`] | [`InferenceConfig`] |
//! | [`error`] | Error types ([`InferenceError`], [`Result`]) |

// Modules
pub mod cli;
pub mod error;
pub mod features;
pub mod format;
pub mod inference;
pub mod linear;
pub mod metadata;
pub mod model;
pub mod postprocessing;
pub mod predictor;
pub mod vehicle;

// Re-export main types for convenience
pub use error::{InferenceError, Result};
pub use features::FeatureVector;
pub use format::ModelFormat;
pub use inference::InferenceConfig;
pub use linear::LinearModel;
pub use metadata::ModelMetadata;
pub use model::RegressionModel;
pub use postprocessing::Prediction;
pub use predictor::{Predictor, predict};
pub use vehicle::{Make, VehicleLookupError, VehicleProfile, VehicleType};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
