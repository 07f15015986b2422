// EcoTrace 🌱 AGPL-3.0 License

use std::fmt;

use clap::Parser;
use clap::error::ErrorKind;

use crate::features::FeatureVector;

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
#[command(after_help = r#"Examples:
    ecotrace-inference 2.0 11 co2_model.onnx
    ecotrace-inference 1.6 10.1 co2_linear.json --verbose
    ecotrace-inference 3.5 12.3 co2_model.onnx --threads 1"#)]
pub struct Cli {
    /// Engine size in litres
    #[arg(allow_hyphen_values = true)]
    pub engine_size: String,

    /// Vehicle mileage
    #[arg(allow_hyphen_values = true)]
    pub mileage: String,

    /// Path to the model artifact (.onnx or .json)
    #[arg(allow_hyphen_values = true)]
    pub model_path: String,

    /// Intra-op threads for ONNX Runtime (0 lets the runtime decide)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Print model details and timing to stderr
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// Parse `engine_size` and `mileage` into a feature vector.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Conversion`] for the first value that isn't a
    /// float.
    pub fn features(&self) -> Result<FeatureVector, ArgumentError> {
        Ok(FeatureVector::new(
            parse_float(&self.engine_size)?,
            parse_float(&self.mileage)?,
        ))
    }
}

/// Errors in the command line itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// Positional arguments missing or extra ones given.
    Count,
    /// A numeric argument failed to parse.
    Conversion(String),
}

impl ArgumentError {
    /// Classify a clap parse failure.
    #[must_use]
    pub fn from_clap(err: &clap::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidValue | ErrorKind::ValueValidation => Self::Conversion(err.to_string()),
            _ => Self::Count,
        }
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count => write!(
                f,
                "Incorrect number of arguments. Engine size, mileage, and model path are required."
            ),
            Self::Conversion(msg) => write!(f, "Argument conversion error: {msg}"),
        }
    }
}

impl std::error::Error for ArgumentError {}

/// Parse a float, ignoring surrounding whitespace.
///
/// Single underscores between digits group them, so `1_000` is `1000.0`.
///
/// # Errors
///
/// Returns [`ArgumentError::Conversion`] naming the offending value.
pub fn parse_float(value: &str) -> Result<f64, ArgumentError> {
    let conversion_error =
        || ArgumentError::Conversion(format!("could not convert string to float: '{value}'"));

    let digits = strip_digit_separators(value.trim()).ok_or_else(conversion_error)?;
    digits.parse::<f64>().map_err(|_| conversion_error())
}

/// Remove `_` separators, which are only allowed with a digit on each side.
fn strip_digit_separators(value: &str) -> Option<String> {
    let bytes = value.as_bytes();
    let grouped = |i: usize| {
        i > 0 && bytes[i - 1].is_ascii_digit() && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
    };

    bytes
        .iter()
        .enumerate()
        .all(|(i, &b)| b != b'_' || grouped(i))
        .then(|| value.replace('_', ""))
}
