//! Verification of observed values against the benefits oracle.
//!
//! API records are compared numerically within a tolerance, because the API
//! serializes money as binary doubles. Dashboard rows are compared as text
//! after presentation formatting.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::config::PayPolicy;
use crate::error::{OracleError, OracleResult};
use crate::models::{DashboardRow, Employee, PaycheckBreakdown};

use super::benefits::calculate_paycheck;

/// A numeric field whose observed value differs from the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMismatch {
    /// The JSON name of the field (`gross`, `benefitsCost` or `net`).
    pub field: String,
    /// The oracle value.
    pub expected: Decimal,
    /// The value the system under test reported.
    pub actual: Decimal,
}

/// A dashboard cell whose text differs from the formatted oracle value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayMismatch {
    /// The column (`gross`, `benefitsCost` or `net`).
    pub field: String,
    /// The formatted oracle value.
    pub expected: String,
    /// The text the page rendered.
    pub actual: String,
}

/// The outcome of checking one employee record against the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeVerification {
    /// Id of the checked record.
    pub employee_id: String,
    /// What the oracle computed from the record's salary and dependants.
    pub expected: PaycheckBreakdown,
    /// What the record reported.
    pub actual: PaycheckBreakdown,
    /// Fields outside the tolerance.
    pub mismatches: Vec<FieldMismatch>,
}

impl EmployeeVerification {
    /// Returns true when every field is within the tolerance.
    pub fn is_match(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Converts a failed verification into an [`OracleError::AssertionFailed`].
    pub fn into_result(self) -> OracleResult<PaycheckBreakdown> {
        if self.is_match() {
            return Ok(self.expected);
        }

        let details: Vec<String> = self
            .mismatches
            .iter()
            .map(|m| format!("{} expected {} got {}", m.field, m.expected, m.actual))
            .collect();
        Err(OracleError::assertion(format!(
            "employee {}: {}",
            self.employee_id,
            details.join(", ")
        )))
    }
}

/// Compares two breakdowns field by field.
///
/// A field mismatches when `|expected - actual| > tolerance`, or when the
/// difference does not fit in a `Decimal`.
pub fn compare_breakdowns(
    expected: &PaycheckBreakdown,
    actual: &PaycheckBreakdown,
    tolerance: Decimal,
) -> Vec<FieldMismatch> {
    [
        ("gross", expected.gross, actual.gross),
        ("benefitsCost", expected.benefits_cost, actual.benefits_cost),
        ("net", expected.net, actual.net),
    ]
    .into_iter()
    .filter(|(_, expected, actual)| {
        expected
            .checked_sub(*actual)
            .is_none_or(|difference| difference.abs() > tolerance)
    })
    .map(|(field, expected, actual)| FieldMismatch {
        field: field.to_string(),
        expected,
        actual,
    })
    .collect()
}

/// Checks an employee record against the oracle.
///
/// The expected values are computed from the record's own `salary` and
/// `dependants`, taken verbatim.
///
/// # Examples
///
/// ```
/// use benefits_oracle::calculation::verify_employee;
/// use benefits_oracle::config::PayPolicy;
/// use benefits_oracle::models::Employee;
/// use rust_decimal::Decimal;
/// use std::num::NonZeroU32;
///
/// let policy = PayPolicy::new(
///     NonZeroU32::new(26).unwrap(),
///     Decimal::from(1000),
///     Decimal::from(500),
/// )
/// .unwrap();
///
/// let employee: Employee = serde_json::from_value(serde_json::json!({
///     "partitionKey": "TestUser", "sortKey": "1", "username": "TestUser", "id": "1",
///     "firstName": "Jane", "lastName": "Smith", "dependants": 1,
///     "salary": 52000, "gross": 2000, "benefitsCost": 57.69231, "net": 1942.3077
/// }))
/// .unwrap();
///
/// assert!(verify_employee(&employee, &policy, Decimal::ZERO).is_match());
/// ```
pub fn verify_employee(
    employee: &Employee,
    policy: &PayPolicy,
    tolerance: Decimal,
) -> EmployeeVerification {
    let expected = calculate_paycheck(employee.salary, employee.dependants, policy);
    let actual = employee.breakdown();
    let mismatches = compare_breakdowns(&expected, &actual, tolerance);

    if !mismatches.is_empty() {
        debug!(
            employee_id = %employee.id,
            mismatches = mismatches.len(),
            "Employee record differs from oracle"
        );
    }

    EmployeeVerification {
        employee_id: employee.id.clone(),
        expected,
        actual,
        mismatches,
    }
}

/// Checks the money cells of a dashboard row against the formatted oracle values.
pub fn verify_dashboard_row(row: &DashboardRow, expected: &PaycheckBreakdown) -> Vec<DisplayMismatch> {
    let expected = expected.displayed();
    let actual = row.displayed();

    [
        ("gross", expected.gross, actual.gross),
        ("benefitsCost", expected.benefits_cost, actual.benefits_cost),
        ("net", expected.net, actual.net),
    ]
    .into_iter()
    .filter(|(_, expected, actual)| expected != actual)
    .map(|(field, expected, actual)| DisplayMismatch {
        field: field.to_string(),
        expected,
        actual,
    })
    .collect()
}
