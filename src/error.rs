//! Error types for the pension engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that can abort a tax, contribution or pension
//! calculation.

use thiserror::Error;

/// The main error type for the pension engine.
///
/// Every fallible operation in the engine returns this error type. Errors
/// are propagated to the caller unchanged; the engine never substitutes a
/// default for a missing or malformed legal constant.
///
/// # Example
///
/// ```
/// use pension_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/isr_tariff.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/isr_tariff.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A caller-supplied value was outside its valid domain.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The name of the offending input.
        field: String,
        /// A description of what made the input invalid.
        message: String,
    },

    /// Configuration was loaded but is unusable for the calculation.
    #[error("Configuration error at '{key}': {message}")]
    ConfigurationError {
        /// The configuration key that is missing or invalid.
        key: String,
        /// A description of the problem.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`EngineError::ConfigurationError`].
    pub fn configuration(key: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::ConfigurationError {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
