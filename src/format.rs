// EcoTrace 🌱 AGPL-3.0 License

//! Model artifact formats.
//!
//! The format is picked from the artifact's file extension; the contents are
//! never sniffed.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Serialized model formats the predictor can load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFormat {
    /// ONNX graph executed with ONNX Runtime (e.g. exported with `skl2onnx`).
    Onnx,
    /// Linear regressor parameters stored as JSON.
    Linear,
}

impl ModelFormat {
    /// Returns the canonical file extension for the format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Onnx => "onnx",
            Self::Linear => "json",
        }
    }

    /// Returns a short human-readable name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Onnx => "onnx",
            Self::Linear => "linear",
        }
    }

    /// Determine the format from a path's extension.
    ///
    /// # Errors
    ///
    /// Returns [`FormatParseError`] when the extension is missing or unknown.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FormatParseError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        ext.parse()
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ModelFormat {
    type Err = FormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_lowercase().as_str() {
            "onnx" => Ok(Self::Onnx),
            "json" | "linear" => Ok(Self::Linear),
            _ => Err(FormatParseError(s.to_string())),
        }
    }
}

/// Error returned for an unsupported model format.
#[derive(Debug, Clone)]
pub struct FormatParseError(String);

impl fmt::Display for FormatParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "missing model file extension, expected one of: .onnx, .json")
        } else {
            write!(
                f,
                "unsupported model format '{}', expected one of: .onnx, .json",
                self.0
            )
        }
    }
}

impl std::error::Error for FormatParseError {}
