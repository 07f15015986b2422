// EcoTrace 🌱 AGPL-3.0 License

//! Model input features.

use ndarray::Array2;

/// Number of features every regression model is fed.
pub const NUM_FEATURES: usize = 2;

/// Feature names in the column order the models were trained with.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = ["engine_size", "mileage"];

/// The `(engine_size, mileage)` pair passed to a model.
///
/// No range checks are applied: any value that parsed as a float is a valid
/// feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    /// Engine displacement in litres.
    pub engine_size: f64,
    /// Fuel consumption figure for the vehicle.
    pub mileage: f64,
}

impl FeatureVector {
    /// Create a feature vector.
    #[must_use]
    pub const fn new(engine_size: f64, mileage: f64) -> Self {
        Self {
            engine_size,
            mileage,
        }
    }

    /// Features as a fixed-size row, in training column order.
    #[must_use]
    pub const fn as_row(&self) -> [f64; NUM_FEATURES] {
        [self.engine_size, self.mileage]
    }

    /// Single-row `[[engine_size, mileage]]` matrix in `f64`.
    #[must_use]
    pub fn to_array(&self) -> Array2<f64> {
        Array2::from_shape_fn((1, NUM_FEATURES), |(_, col)| self.as_row()[col])
    }

    /// Single-row `[[engine_size, mileage]]` matrix in `f32`, the element type
    /// ONNX regressors take.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_array_f32(&self) -> Array2<f32> {
        self.to_array().mapv(|v| v as f32)
    }
}

impl From<(f64, f64)> for FeatureVector {
    fn from((engine_size, mileage): (f64, f64)) -> Self {
        Self::new(engine_size, mileage)
    }
}
