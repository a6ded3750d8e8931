//! Employee record and request body types.
//!
//! These mirror the JSON the `/Employees` resource exchanges. Money travels
//! as JSON numbers and is read into [`Decimal`] on arrival.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{OracleError, OracleResult};

use super::PaycheckBreakdown;

/// The largest number of dependants an employee record may carry.
pub const MAX_DEPENDANTS: u32 = 32;

/// The longest first or last name, in characters.
pub const MAX_NAME_LENGTH: usize = 50;

/// An employee record as returned by the system under test.
///
/// All eleven fields are required and unknown fields are rejected, so a
/// successful decode doubles as a schema check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Employee {
    /// Storage partition key (the owning username).
    pub partition_key: String,
    /// Storage sort key.
    pub sort_key: String,
    /// The owning username.
    pub username: String,
    /// Unique identifier of the employee.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Number of dependants, `0..=32`.
    pub dependants: u32,
    /// Annual gross salary.
    #[serde(with = "rust_decimal::serde::float")]
    pub salary: Decimal,
    /// Gross pay per paycheck.
    #[serde(with = "rust_decimal::serde::float")]
    pub gross: Decimal,
    /// Benefits cost per paycheck.
    #[serde(with = "rust_decimal::serde::float")]
    pub benefits_cost: Decimal,
    /// Net pay per paycheck.
    #[serde(with = "rust_decimal::serde::float")]
    pub net: Decimal,
}

impl Employee {
    /// Returns the per-paycheck amounts the system reported.
    pub fn breakdown(&self) -> PaycheckBreakdown {
        PaycheckBreakdown {
            gross: self.gross,
            benefits_cost: self.benefits_cost,
            net: self.net,
        }
    }

    /// Checks the value constraints the record schema does not express as types.
    pub fn validate(&self) -> OracleResult<()> {
        validate_dependants(self.dependants)?;
        if self.salary < Decimal::ZERO {
            return Err(OracleError::InvalidEmployee {
                field: "salary".to_string(),
                message: format!("must not be negative, got {}", self.salary),
            });
        }
        Ok(())
    }
}

/// The body of a create (POST) or update (PUT) request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    /// Id of the employee to update; absent when creating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Number of dependants.
    #[serde(default)]
    pub dependants: u32,
    /// Owning username, when the caller wants to set it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl EmployeeDraft {
    /// Creates a draft for a new employee.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, dependants: u32) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            dependants,
            username: None,
        }
    }

    /// Turns the draft into an update of the employee with `id`.
    pub fn for_update(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Checks names are present and short enough, and dependants are within range.
    pub fn validate(&self) -> OracleResult<()> {
        validate_name("firstName", &self.first_name)?;
        validate_name("lastName", &self.last_name)?;
        validate_dependants(self.dependants)
    }
}

fn validate_name(field: &str, value: &str) -> OracleResult<()> {
    if value.trim().is_empty() {
        return Err(OracleError::InvalidEmployee {
            field: field.to_string(),
            message: "is required".to_string(),
        });
    }
    let length = value.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(OracleError::InvalidEmployee {
            field: field.to_string(),
            message: format!("must not exceed {} characters, got {}", MAX_NAME_LENGTH, length),
        });
    }
    Ok(())
}

fn validate_dependants(dependants: u32) -> OracleResult<()> {
    if dependants > MAX_DEPENDANTS {
        return Err(OracleError::InvalidEmployee {
            field: "dependants".to_string(),
            message: format!("must not exceed {}, got {}", MAX_DEPENDANTS, dependants),
        });
    }
    Ok(())
}
