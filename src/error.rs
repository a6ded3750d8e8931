//! Error types for the benefits oracle.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure outside the calculator itself: configuration loading,
//! malformed records, HTTP transport and contract assertions.

use thiserror::Error;

/// The main error type for the benefits oracle.
///
/// The calculator never fails; everything around it (configuration, the
/// HTTP client, the contract suite and the stub API) returns this error.
///
/// # Example
///
/// ```
/// use benefits_oracle::error::OracleError;
///
/// let error = OracleError::MissingSetting {
///     name: "API_URL".to_string(),
/// };
/// assert_eq!(error.to_string(), "Required setting is missing: API_URL");
/// ```
#[derive(Debug, Error)]
pub enum OracleError {
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

    /// A required setting was not provided.
    #[error("Required setting is missing: {name}")]
    MissingSetting {
        /// The environment variable or YAML key that was missing.
        name: String,
    },

    /// A setting was present but could not be used.
    #[error("Invalid setting '{name}': {message}")]
    InvalidSetting {
        /// The environment variable or YAML key.
        name: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No employee exists with the given id.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A dashboard table row could not be read.
    #[error("Invalid dashboard row: {message}")]
    InvalidDashboardRow {
        /// A description of what was wrong with the row.
        message: String,
    },

    /// The system under test answered with a status the contract does not allow.
    #[error("{method} {url} returned {actual}, expected {expected}")]
    UnexpectedStatus {
        /// The HTTP method of the request.
        method: String,
        /// The requested URL.
        url: String,
        /// The status the contract requires.
        expected: u16,
        /// The status that was returned.
        actual: u16,
    },

    /// A contract assertion did not hold.
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// What was expected and what was observed.
        message: String,
    },

    /// The HTTP request could not be completed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON body could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OracleError {
    /// Creates an [`OracleError::AssertionFailed`] from any message.
    pub fn assertion(message: impl Into<String>) -> Self {
        OracleError::AssertionFailed {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return OracleError.
pub type OracleResult<T> = Result<T, OracleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = OracleError::ConfigNotFound {
            path: "/missing/oracle.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/oracle.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = OracleError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_setting_displays_name_and_message() {
        let error = OracleError::InvalidSetting {
            name: "PAY_PERIODS_PER_YEAR".to_string(),
            message: "must be greater than zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid setting 'PAY_PERIODS_PER_YEAR': must be greater than zero"
        );
    }

    #[test]
    fn test_invalid_employee_displays_field_and_message() {
        let error = OracleError::InvalidEmployee {
            field: "dependants".to_string(),
            message: "must not exceed 32".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid employee field 'dependants': must not exceed 32"
        );
    }

    #[test]
    fn test_unexpected_status_displays_request_and_statuses() {
        let error = OracleError::UnexpectedStatus {
            method: "POST".to_string(),
            url: "http://localhost/api/Employees".to_string(),
            expected: 401,
            actual: 200,
        };
        assert_eq!(
            error.to_string(),
            "POST http://localhost/api/Employees returned 200, expected 401"
        );
    }

    #[test]
    fn test_assertion_helper_builds_assertion_failed() {
        let error = OracleError::assertion("net differs");
        assert!(matches!(error, OracleError::AssertionFailed { .. }));
        assert_eq!(error.to_string(), "Assertion failed: net differs");
    }

    #[test]
    fn test_json_error_converts_with_question_mark() {
        fn parse() -> OracleResult<serde_json::Value> {
            Ok(serde_json::from_str("{not json")?)
        }

        assert!(matches!(parse(), Err(OracleError::Json(_))));
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<OracleError>();
    }
}
