//! Response types for the pension engine API.
//!
//! This module defines the success envelope, the per-endpoint result bodies,
//! and the error response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{
    EffectiveRatePoint, Lss1997Result, ReplacementRatePoint, RetirementAgeRow,
    VoluntaryRateSolution,
};
use crate::error::EngineError;

/// Metadata wrapped around every successful calculation.
///
/// The result fields are flattened into the top-level JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationEnvelope<T> {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Time spent calculating, in microseconds.
    pub duration_us: u64,
    /// The calculation result.
    #[serde(flatten)]
    pub result: T,
}

impl<T> CalculationEnvelope<T> {
    /// Wraps a result with a fresh calculation id and the current time.
    pub fn new(result: T, duration_us: u64) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            duration_us,
            result,
        }
    }
}

/// Result body of `/payroll/effective-rate-curve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveRateCurveResponse {
    /// Curve points in ascending income order.
    pub points: Vec<EffectiveRatePoint>,
}

/// Result body of `/lss1997/solve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResponse {
    /// The voluntary rate found by the solver.
    pub solution: VoluntaryRateSolution,
    /// The 1997-regime evaluation at that rate.
    pub pension: Lss1997Result,
}

/// Result body of `/lss1997/curve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementRateCurveResponse {
    /// Curve points in ascending voluntary-rate order.
    pub points: Vec<ReplacementRatePoint>,
}

/// Result body of `/lss1973/sweep`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetirementSweepResponse {
    /// One row per retirement age, ascending.
    pub rows: Vec<RetirementAgeRow>,
    /// The row with the highest replacement rate.
    pub best: Option<RetirementAgeRow>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid input error naming the offending field.
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        Self::with_details(
            "INVALID_INPUT",
            message,
            format!("The field '{}' has an invalid value", field),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidInput { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::invalid_input(&field, message),
            },
            EngineError::ConfigurationError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::ConfigNotFound { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::ConfigParseError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    message,
                ),
            },
        }
    }
}
