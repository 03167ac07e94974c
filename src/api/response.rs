//! Response types for the payroll engine API.
//!
//! This module defines the success bodies, the error response structures
//! and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{PayrollOutcome, RosterOutcome};
use crate::error::EngineError;

/// Response body for the `/pay-line` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayLineResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the result.
    pub engine_version: String,
    /// The instant open sessions were measured up to.
    pub as_of: DateTime<Utc>,
    /// Pay line, daily breakdown, sessions, diagnostics and audit trace.
    #[serde(flatten)]
    pub outcome: PayrollOutcome,
}

/// Response body for the `/roster-summary` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the result.
    pub engine_version: String,
    /// The instant open sessions were measured up to.
    pub as_of: DateTime<Utc>,
    /// Summary, per-employee pay lines and diagnostics.
    #[serde(flatten)]
    pub outcome: RosterOutcome,
}

impl PayLineResponse {
    /// Wraps an outcome with calculation metadata.
    pub fn new(as_of: DateTime<Utc>, outcome: PayrollOutcome) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            as_of,
            outcome,
        }
    }
}

impl RosterResponse {
    /// Wraps a roster outcome with calculation metadata.
    pub fn new(as_of: DateTime<Utc>, outcome: RosterOutcome) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            as_of,
            outcome,
        }
    }
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

    /// Creates a role not found error response.
    pub fn role_not_found(role: &str) -> Self {
        Self::with_details(
            "ROLE_NOT_FOUND",
            format!("Role not found: {}", role),
            format!("The role '{}' has no entry in the salary table", role),
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
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
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { field, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid configuration",
                    format!("{}: {}", field, message),
                ),
            },
            EngineError::RoleNotFound { role } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::role_not_found(&role),
            },
            EngineError::InvalidPeriod { start, end } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PERIOD",
                    format!("Invalid pay period {} to {}", start, end),
                    "The period end date must not be before its start date",
                ),
            },
            EngineError::InvalidWageRate {
                employee_id,
                amount,
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_WAGE_RATE",
                    format!("Invalid wage for employee {}", employee_id),
                    format!("Wage amount {} must be greater than zero", amount),
                ),
            },
            err @ (EngineError::PayOverflow { .. } | EngineError::RosterOverflow { .. }) => {
                ApiErrorResponse {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    error: ApiError::with_details(
                        "PAY_OVERFLOW",
                        "Pay amounts are out of range",
                        err.to_string(),
                    ),
                }
            }
        }
    }
}
