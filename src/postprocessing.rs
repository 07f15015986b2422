// EcoTrace 🌱 AGPL-3.0 License

//! Post-processing of raw regression output.
//!
//! Raw predictions are divided by the configured scale and rounded to a fixed
//! number of decimal places. Rounding goes through Rust's exact decimal
//! formatting, so ties resolve half-to-even on the true binary value.

use std::fmt;

use crate::inference::InferenceConfig;

/// A rescaled prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Value returned by the model.
    pub raw: f64,
    /// `raw / scale`, rounded.
    pub value: f64,
}

impl Prediction {
    /// Rescale a raw model output according to `config`.
    #[must_use]
    pub fn from_raw(raw: f64, config: &InferenceConfig) -> Self {
        Self {
            raw,
            value: rescale(raw, config.scale, config.decimals),
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_value(self.value))
    }
}

/// Divide `raw` by `scale` and round to `decimals` places.
#[must_use]
pub fn rescale(raw: f64, scale: f64, decimals: usize) -> f64 {
    round_to(raw / scale, decimals)
}

/// Round to `decimals` places.
///
/// Non-finite values pass through unchanged.
#[must_use]
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Format a float the way Python's `repr` does: shortest round-trip digits,
/// always with a fractional part, switching to exponent form below `1e-4` and
/// from `1e16` up.
#[must_use]
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let scientific = format!("{value:e}");
        return match scientific.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => scientific,
        };
    }

    let s = value.to_string();
    if s.contains('.') { s } else { format!("{s}.0") }
}
