// EcoTrace 🌱 AGPL-3.0 License

//! Inference configuration.
//!
//! This module defines the [`InferenceConfig`] struct, which controls the
//! ONNX Runtime session and how raw model output is rescaled for display.

use crate::error::{InferenceError, Result};

/// Raw predictions are divided by this before display.
pub const DEFAULT_SCALE: f64 = 1000.0;

/// Decimal places kept after rescaling.
pub const DEFAULT_DECIMALS: usize = 3;

/// Configuration for regression inference.
///
/// # Example
///
/// ```rust
/// use ecotrace_inference::InferenceConfig;
///
/// let config = InferenceConfig::new().with_threads(1).with_decimals(2);
/// assert_eq!(config.decimals, 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceConfig {
    /// Number of intra-op threads for ONNX Runtime.
    /// Setting this to `0` allows ONNX Runtime to choose.
    pub num_threads: usize,
    /// Divisor applied to the raw model output.
    pub scale: f64,
    /// Decimal places the rescaled value is rounded to.
    pub decimals: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            num_threads: 0,
            scale: DEFAULT_SCALE,
            decimals: DEFAULT_DECIMALS,
        }
    }
}

impl InferenceConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of threads for inference.
    ///
    /// # Arguments
    ///
    /// * `threads` - The number of intra-op threads. Set to `0` for auto-configuration.
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = threads;
        self
    }

    /// Set the divisor applied to raw predictions.
    #[must_use]
    pub const fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the number of decimal places kept.
    #[must_use]
    pub const fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    /// Check the configuration for values that would make every prediction
    /// meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ConfigError`] if the scale is zero or not
    /// finite.
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale == 0.0 {
            return Err(InferenceError::ConfigError(format!(
                "scale must be a finite non-zero number, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}
