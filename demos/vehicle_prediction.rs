// EcoTrace 🌱 AGPL-3.0 License

//! Example script predicting CO2 figures for every vehicle profile.
//!
//! Usage: `cargo run --example vehicle_prediction -- co2_model.onnx`

use std::env;

use ecotrace_inference::{
    InferenceConfig, Make, Predictor, RegressionModel, Result, VehicleProfile, VehicleType,
};

fn main() -> Result<()> {
    let model_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "co2_model.onnx".to_string());

    // Load once and reuse the model for every profile
    let predictor = Predictor::new(InferenceConfig::default())?;
    let mut model = RegressionModel::load_with_config(&model_path, predictor.config())?;
    println!("{}", model.metadata().summary());

    for make in Make::ALL {
        for vehicle_type in [VehicleType::Hatchback, VehicleType::Sedan, VehicleType::Suv] {
            let profile = VehicleProfile::new(make, vehicle_type);
            let prediction = predictor.predict_with(&mut model, &profile.features)?;
            println!("{make:<14} {vehicle_type:<10} {prediction}");
        }
    }

    Ok(())
}
