//! Core data models for the benefits oracle.
//!
//! This module contains the value types exchanged between the calculator,
//! the HTTP client and the contract suite.

mod audit;
mod dashboard;
mod employee;
mod paycheck;

pub use audit::AuditStep;
pub use dashboard::{DASHBOARD_COLUMNS, DashboardRow};
pub use employee::{Employee, EmployeeDraft, MAX_DEPENDANTS, MAX_NAME_LENGTH};
pub use paycheck::{DisplayedPaycheck, PaycheckBreakdown};
