// EcoTrace 🌱 AGPL-3.0 License

//! Model metadata.
//!
//! ONNX exporters store producer information and free-form key/value pairs
//! in the graph's metadata properties. Linear artifacts carry their own
//! feature names and description.

use std::collections::HashMap;

use crate::features::{FEATURE_NAMES, NUM_FEATURES};
use crate::format::ModelFormat;
use crate::linear::LinearModel;

/// Descriptive information about a loaded model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMetadata {
    /// Artifact format.
    pub format: ModelFormat,
    /// Tool that produced the artifact (e.g. "skl2onnx").
    pub producer: Option<String>,
    /// Model description.
    pub description: Option<String>,
    /// Input tensor name.
    pub input_name: String,
    /// Output tensor name the prediction is read from.
    pub output_name: String,
    /// Feature names in column order.
    pub feature_names: Vec<String>,
    /// Number of input features, when the artifact states it.
    pub num_features: Option<usize>,
}

impl ModelMetadata {
    /// Build metadata for a linear JSON artifact.
    #[must_use]
    pub fn from_linear(model: &LinearModel) -> Self {
        let feature_names = if !model.feature_names.is_empty() {
            model.feature_names.clone()
        } else if model.num_features() == NUM_FEATURES {
            default_feature_names()
        } else {
            (0..model.num_features()).map(|i| format!("x{i}")).collect()
        };

        Self {
            format: ModelFormat::Linear,
            producer: None,
            description: model.description.clone(),
            input_name: "coefficients".to_string(),
            output_name: "prediction".to_string(),
            feature_names,
            num_features: Some(model.num_features()),
        }
    }

    /// Build metadata from the custom properties of an ONNX graph.
    ///
    /// `feature_names` is read as a comma-separated list when present.
    #[must_use]
    pub fn from_onnx_properties(
        input_name: String,
        output_name: String,
        producer: Option<String>,
        properties: &HashMap<String, String>,
    ) -> Self {
        let feature_names = properties
            .get("feature_names")
            .map(|names| {
                names
                    .split(',')
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|names| !names.is_empty())
            .unwrap_or_else(default_feature_names);

        Self {
            format: ModelFormat::Onnx,
            producer: producer.filter(|p| !p.is_empty()),
            description: properties.get("description").cloned(),
            input_name,
            output_name,
            feature_names,
            num_features: None,
        }
    }

    /// Short one-line summary of the model.
    #[must_use]
    pub fn summary(&self) -> String {
        let producer = self.producer.as_deref().unwrap_or("unknown producer");
        format!(
            "{} model ({producer}), features=[{}], input='{}', output='{}'",
            self.format,
            self.feature_names.join(", "),
            self.input_name,
            self.output_name
        )
    }
}

fn default_feature_names() -> Vec<String> {
    FEATURE_NAMES.iter().map(|n| (*n).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_linear_defaults_feature_names() {
        let meta = ModelMetadata::from_linear(&LinearModel::new(vec![1.0, 2.0], 0.0));
        assert_eq!(meta.format, ModelFormat::Linear);
        assert_eq!(meta.feature_names, vec!["engine_size", "mileage"]);
        assert!(meta.producer.is_none());
        assert_eq!(meta.num_features, Some(2));
    }

    #[test]
    fn test_from_linear_generic_names() {
        let meta = ModelMetadata::from_linear(&LinearModel::new(vec![1.0, 2.0, 3.0], 0.0));
        assert_eq!(meta.feature_names, vec!["x0", "x1", "x2"]);
        assert_eq!(meta.num_features, Some(3));
    }

    #[test]
    fn test_from_onnx_properties() {
        let mut props = HashMap::new();
        props.insert("feature_names".to_string(), "Engine Size, Fuel Consumption".to_string());
        props.insert("description".to_string(), "co2 regressor".to_string());

        let meta = ModelMetadata::from_onnx_properties(
            "float_input".to_string(),
            "variable".to_string(),
            Some("skl2onnx".to_string()),
            &props,
        );
        assert_eq!(meta.feature_names, vec!["Engine Size", "Fuel Consumption"]);
        assert_eq!(meta.description.as_deref(), Some("co2 regressor"));
        assert!(meta.summary().contains("onnx model (skl2onnx)"));
        assert!(meta.summary().contains("input='float_input'"));
    }

    #[test]
    fn test_from_onnx_properties_empty() {
        let meta = ModelMetadata::from_onnx_properties(
            "x".to_string(),
            "y".to_string(),
            Some(String::new()),
            &HashMap::new(),
        );
        assert!(meta.producer.is_none());
        assert_eq!(meta.feature_names.len(), 2);
        assert!(meta.summary().contains("unknown producer"));
    }
}
