// EcoTrace 🌱 AGPL-3.0 License

//! CLI module for running predictions.
//!
//! This module contains the command-line interface logic, including argument
//! parsing and the prediction command.

/// CLI arguments.
pub mod args;

/// Console output macros and verbosity.
pub mod logging;

/// Prediction logic.
pub mod predict;
