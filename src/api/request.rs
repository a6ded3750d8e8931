//! Request checks for the stub `/Employees` API.
//!
//! Authorization, id parsing and body decoding failures are turned into
//! error responses here so the handlers only deal with valid requests.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderMap, StatusCode, header},
};
use uuid::Uuid;

use crate::models::EmployeeDraft;

use super::response::{ApiError, ApiErrorResponse};
use super::state::StubSettings;

/// Accepts the request only if it carries the configured `Authorization` value.
pub fn authorize(settings: &StubSettings, headers: &HeaderMap) -> Result<(), ApiErrorResponse> {
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match presented {
        Some(value) if value == settings.token => Ok(()),
        _ => Err(ApiErrorResponse::new(
            StatusCode::UNAUTHORIZED,
            ApiError::unauthorized(),
        )),
    }
}

/// Parses an employee id path segment.
pub fn parse_employee_id(raw: &str) -> Result<Uuid, ApiErrorResponse> {
    Uuid::parse_str(raw)
        .map_err(|_| ApiErrorResponse::new(StatusCode::BAD_REQUEST, ApiError::invalid_id(raw)))
}

/// Unwraps a JSON body, mapping every rejection to a 400 response.
pub fn draft_from_payload(
    payload: Result<Json<EmployeeDraft>, JsonRejection>,
) -> Result<EmployeeDraft, ApiErrorResponse> {
    match payload {
        Ok(Json(draft)) => Ok(draft),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse::new(StatusCode::BAD_REQUEST, error))
        }
    }
}
