// EcoTrace 🌱 AGPL-3.0 License

//! Integration tests for the library and the `ecotrace-inference` binary.

use std::io::Write;
use std::process::{Command, Output};

use ecotrace_inference::{
    FeatureVector, InferenceConfig, InferenceError, Predictor, RegressionModel, VehicleProfile,
    predict,
};
use tempfile::NamedTempFile;

const LINEAR_MODEL: &str = r#"{
    "coefficients": [10.0, 5.0],
    "intercept": 100.0,
    "feature_names": ["engine_size", "mileage"],
    "description": "test regressor"
}"#;

fn artifact(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ecotrace-inference"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_predict_matches_rescaled_model_output() {
    let model = artifact(".json", LINEAR_MODEL);
    let raw = predict(2.0, 11.0, model.path()).unwrap();
    assert!((raw - 175.0).abs() < 1e-9);

    let prediction = Predictor::new(InferenceConfig::default())
        .unwrap()
        .predict(&FeatureVector::new(2.0, 11.0), model.path())
        .unwrap();
    assert!((prediction.value - 0.175).abs() < f64::EPSILON);
}

#[test]
fn test_load_and_predict_errors_are_distinct() {
    let err = predict(2.0, 11.0, "no/such/model.onnx").unwrap_err();
    assert!(matches!(err, InferenceError::ModelLoadError(_)));

    let wrong_shape = artifact(".json", r#"{"coefficients": [1.0, 2.0, 3.0]}"#);
    let err = predict(2.0, 11.0, wrong_shape.path()).unwrap_err();
    assert!(matches!(err, InferenceError::PredictionError(_)));
}

#[test]
fn test_vehicle_profile_prediction() {
    let model = artifact(".json", LINEAR_MODEL);
    let mut loaded = RegressionModel::load(model.path()).unwrap();
    let profile = VehicleProfile::lookup("Toyota", "Sedan").unwrap();

    let prediction = Predictor::default()
        .predict_with(&mut loaded, &profile.features)
        .unwrap();
    // 100 + 10 * 2 + 5 * 9
    assert_eq!(prediction.to_string(), "0.165");
}

#[test]
fn test_cli_success() {
    let model = artifact(".json", LINEAR_MODEL);
    let output = run_cli(&["2", "11", model.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).trim(), "0.175");
}

#[test]
fn test_cli_is_idempotent() {
    let model = artifact(".json", LINEAR_MODEL);
    let path = model.path().to_str().unwrap();
    let first = run_cli(&["3", "12", path]);
    let second = run_cli(&["3", "12", path]);
    assert_eq!(stdout(&first), stdout(&second));
    assert_eq!(stdout(&first).trim(), "0.19");
}

#[test]
fn test_cli_wrong_argument_count() {
    for args in [vec![], vec!["2", "11"], vec!["2", "11", "model.onnx", "extra"]] {
        let output = run_cli(&args);
        assert_eq!(output.status.code(), Some(1), "args: {args:?}");
        assert!(stdout(&output).contains("Incorrect number of arguments"));
    }
}

#[test]
fn test_cli_non_numeric_argument() {
    let output = run_cli(&["two", "11", "model.onnx"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Argument conversion error"));
    assert!(stdout(&output).contains("'two'"));

    let output = run_cli(&["2", "eleven", "model.onnx"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Argument conversion error"));
}

#[test]
fn test_cli_missing_model() {
    let output = run_cli(&["2", "11", "does_not_exist.onnx"]);
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("Model loading failed"));
    assert_eq!(out.lines().last(), Some("An error occurred during prediction"));
}

#[test]
fn test_cli_prediction_failure() {
    let model = artifact(".json", r#"{"coefficients": [1.0]}"#);
    let output = run_cli(&["2", "11", model.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("Prediction failed"));
    assert_eq!(out.lines().last(), Some("An error occurred during prediction"));
}

#[test]
fn test_cli_verbose_keeps_stdout_clean() {
    let model = artifact(".json", LINEAR_MODEL);
    let output = run_cli(&["2", "11", model.path().to_str().unwrap(), "--verbose"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).trim(), "0.175");
    assert!(String::from_utf8_lossy(&output.stderr).contains("linear model"));
}

#[test]
fn test_cli_hyphenated_numbers_are_values() {
    let model = artifact(".json", LINEAR_MODEL);
    let path = model.path().to_str().unwrap();

    let output = run_cli(&["-2", "11", path]);
    assert_eq!(output.status.code(), Some(0));
    // 100 - 20 + 55
    assert_eq!(stdout(&output).trim(), "0.135");

    // parses, then the model refuses the infinite feature
    let output = run_cli(&["-inf", "11", path]);
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(!out.contains("Incorrect number of arguments"));
    assert!(out.contains("Prediction failed: Input X contains infinity"));
}

#[test]
fn test_cli_hyphenated_garbage_is_conversion_error() {
    let model = artifact(".json", LINEAR_MODEL);
    let output = run_cli(&["-abc", "11", model.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output).trim(),
        "Argument conversion error: could not convert string to float: '-abc'"
    );
}

#[test]
fn test_cli_non_finite_features() {
    let model = artifact(".json", LINEAR_MODEL);
    let path = model.path().to_str().unwrap();
    for (args, reason) in [
        (["nan", "11", path], "Input X contains NaN."),
        (["inf", "11", path], "Input X contains infinity"),
        (["2", "-infinity", path], "Input X contains infinity"),
    ] {
        let output = run_cli(&args);
        assert_eq!(output.status.code(), Some(0), "args: {args:?}");
        let out = stdout(&output);
        assert!(out.contains(reason), "args: {args:?}, stdout: {out}");
        assert_eq!(out.lines().last(), Some("An error occurred during prediction"));
    }
}

#[test]
fn test_cli_digit_separators() {
    let model = artifact(".json", r#"{"coefficients": [0.5, 1.0]}"#);
    let output = run_cli(&["1_000", "0", model.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).trim(), "0.5");
}

#[test]
fn test_cli_onnx_model() {
    let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/linear_f32.onnx");
    // needs the ONNX Runtime library at run time
    if RegressionModel::load(fixture).is_err() {
        return;
    }
    let output = run_cli(&["2", "11", fixture]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).trim(), "0.175");
}
