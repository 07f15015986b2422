// EcoTrace 🌱 AGPL-3.0 License

use std::time::Instant;

use crate::cli::args::{ArgumentError, Cli};
use crate::features::NUM_FEATURES;
use crate::{FeatureVector, InferenceConfig, Prediction, Predictor, RegressionModel, Result, VERSION};
use crate::{info, section, verbose, warn};

/// Message printed whenever the model can't produce a prediction.
pub const PREDICTION_FAILED: &str = "An error occurred during prediction";

/// Run a prediction for the parsed command line.
///
/// Model failures are reported on stdout and are not errors of the command
/// line, so they return `Ok`.
///
/// # Errors
///
/// Returns [`ArgumentError::Conversion`] if engine size or mileage isn't a
/// number.
pub fn run_prediction(args: &Cli) -> std::result::Result<(), ArgumentError> {
    let features = args.features()?;
    let config = InferenceConfig::new().with_threads(args.threads);

    section!("EcoTrace {VERSION} 🌱 regression inference");
    verbose!(
        "features: engine_size={}, mileage={}",
        features.engine_size,
        features.mileage
    );

    match predict_and_report(&features, &args.model_path, config) {
        Ok(prediction) => {
            info!("{prediction}");
        }
        Err(e) => {
            info!("{e}");
            info!("{PREDICTION_FAILED}");
        }
    }

    Ok(())
}

fn predict_and_report(
    features: &FeatureVector,
    model_path: &str,
    config: InferenceConfig,
) -> Result<Prediction> {
    let predictor = Predictor::new(config)?;

    let start_load = Instant::now();
    let mut model = RegressionModel::load_with_config(model_path, predictor.config())?;
    let load_time = start_load.elapsed().as_secs_f64() * 1000.0;
    verbose!("{}", model.metadata().summary());

    if let Some(n) = model.metadata().num_features.filter(|&n| n != NUM_FEATURES) {
        warn!("model expects {n} features but {NUM_FEATURES} are provided");
    }

    let start_inference = Instant::now();
    let prediction = predictor.predict_with(&mut model, features)?;
    let inference_time = start_inference.elapsed().as_secs_f64() * 1000.0;

    verbose!(
        "raw={} scaled={} (load {load_time:.1}ms, inference {inference_time:.1}ms)",
        prediction.raw,
        prediction
    );

    Ok(prediction)
}
