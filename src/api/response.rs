//! Response types for the stub `/Employees` API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::OracleError;

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

    /// Creates an error for a missing or wrong `Authorization` header.
    pub fn unauthorized() -> Self {
        Self::new("UNAUTHORIZED", "A valid Authorization header is required")
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an error for an id that is not a UUID.
    pub fn invalid_id(id: &str) -> Self {
        Self::with_details(
            "INVALID_ID",
            format!("Invalid employee id: {}", id),
            "Employee ids are UUIDs",
        )
    }

    /// Creates an employee not found error response.
    pub fn not_found(id: &str) -> Self {
        Self::new("NOT_FOUND", format!("Employee not found: {}", id))
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
    /// Pairs an error body with a status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<OracleError> for ApiErrorResponse {
    fn from(error: OracleError) -> Self {
        match error {
            OracleError::InvalidEmployee { field, message } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid employee field '{}'", field),
                    message,
                ),
            ),
            OracleError::EmployeeNotFound { id } => {
                ApiErrorResponse::new(StatusCode::NOT_FOUND, ApiError::not_found(&id))
            }
            OracleError::Json(err) => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::malformed_json(err.to_string()),
            ),
            other => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", other.to_string()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_employee_maps_to_bad_request() {
        let response: ApiErrorResponse = OracleError::InvalidEmployee {
            field: "dependants".to_string(),
            message: "must not exceed 32, got 33".to_string(),
        }
        .into();

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "VALIDATION_ERROR");
        assert_eq!(
            response.error.details.as_deref(),
            Some("must not exceed 32, got 33")
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response: ApiErrorResponse = OracleError::EmployeeNotFound {
            id: "99999999-9999-9999-9999-999999999999".to_string(),
        }
        .into();

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "NOT_FOUND");
    }

    #[test]
    fn test_other_errors_map_to_internal_error() {
        let response: ApiErrorResponse = OracleError::MissingSetting {
            name: "API_URL".to_string(),
        }
        .into();

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_details_are_omitted_when_absent() {
        let json = serde_json::to_value(ApiError::unauthorized()).unwrap();

        assert_eq!(json["code"], "UNAUTHORIZED");
        assert!(json.get("details").is_none());
    }
}
