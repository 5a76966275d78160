//! Response types for the Work Tracker API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::tracker::{LoadOutcome, TrackerSnapshot};

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
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<TrackerError> for ApiErrorResponse {
    fn from(error: TrackerError) -> Self {
        let message = error.to_string();
        match error {
            TrackerError::ConfigNotFound { .. }
            | TrackerError::ConfigParseError { .. }
            | TrackerError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            TrackerError::InvalidMonth { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_MONTH",
                    message,
                    "Month must be between 1 and 12",
                ),
            },
            TrackerError::DataUnavailable { .. } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::new("DATA_UNAVAILABLE", message),
            },
            TrackerError::WriteRejected { .. } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details(
                    "WRITE_REJECTED",
                    message,
                    "The store did not accept the change; nothing was modified",
                ),
            },
            TrackerError::DateOutsideWindow { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "DATE_OUTSIDE_MONTH",
                    message,
                    "Select the month containing the date before toggling it",
                ),
            },
            TrackerError::MonthLoading { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "MONTH_LOADING",
                    message,
                    "Retry once the month has finished loading",
                ),
            },
        }
    }
}

/// Body returned by the selection endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionResponse {
    /// Whether this request's load became current.
    pub outcome: LoadOutcome,
    /// The state of the selected month after the request.
    #[serde(flatten)]
    pub view: TrackerSnapshot,
}
