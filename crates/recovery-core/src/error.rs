//! Core error types for recovery-core.
//!
//! This module defines the error hierarchy using thiserror. Model errors are
//! the only ones the computation itself can raise; configuration errors come
//! from reading and writing the TOML settings file.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for recovery-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Model evaluation errors
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while evaluating the recovery model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The daily growth ratio is exactly 1, so the geometric series closed
    /// form divides by zero.
    #[error("Degenerate growth ratio {ratio}: the learning multiplier must be at least 1%")]
    DegenerateGrowthRatio { ratio: f64 },

    /// The product of the three exposure scores does not fit in `u32`.
    #[error("Daily response overflows for struggle {struggle}, duration {duration}, frequency {frequency}")]
    ResponseOverflow {
        struggle: u32,
        duration: u32,
        frequency: u32,
    },

    /// The compounded sum overflowed `f64`.
    #[error(
        "Cumulative effect is not finite (daily response {daily_response}, \
         learning multiplier {learning_multiplier}%, {days_applied} days)"
    )]
    NonFiniteResult {
        daily_response: u32,
        learning_multiplier: u32,
        days_applied: u32,
    },

    /// An input lies outside its inclusive bounds.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_field_and_bounds() {
        let err = ModelError::OutOfRange {
            field: "struggle",
            value: 11,
            min: 1,
            max: 10,
        };
        assert_eq!(err.to_string(), "struggle must be between 1 and 10, got 11");
    }

    #[test]
    fn model_error_converts_into_core_error() {
        let err: CoreError = ModelError::DegenerateGrowthRatio { ratio: 1.0 }.into();
        assert!(matches!(err, CoreError::Model(_)));
        assert!(err.to_string().contains("Degenerate growth ratio 1"));
    }
}
