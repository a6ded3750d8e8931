//! Contract suite for the `/Employees` API.
//!
//! The suite checks status codes, record shape and the per-paycheck
//! amounts against the benefits oracle. Cases declared against a known
//! defect are expected to fail; if one passes, the report says so.

mod report;
mod runner;

pub use report::{
    AUTH_BYPASS_ON_CREATE, CaseOutcome, CaseResult, Expectation, KnownDefect, SuiteReport,
};
pub use runner::{ApiSuite, MALFORMED_EMPLOYEE_ID, UNKNOWN_EMPLOYEE_ID, cases};
