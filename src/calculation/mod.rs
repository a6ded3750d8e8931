//! Calculation logic for the benefits oracle.
//!
//! This module contains the per-paycheck benefits calculation, its rounding
//! policy, presentation formatting for on-screen values, and the checks that
//! compare what the system under test reports against the oracle.

mod benefits;
mod rounding;
mod verification;

pub use benefits::{
    PaycheckCalculationResult, RULE_BENEFITS_COST, RULE_DEPENDANT_BENEFIT, RULE_EMPLOYEE_BENEFIT,
    RULE_GROSS_PAY, RULE_NET_PAY, calculate_paycheck, calculate_paycheck_with_audit,
};
pub use rounding::{
    BENEFITS_COST_DECIMAL_PLACES, DISPLAY_DECIMAL_PLACES, NET_PAY_DECIMAL_PLACES, ceil_net_pay,
    format_display, round_benefits_cost,
};
pub use verification::{
    DisplayMismatch, EmployeeVerification, FieldMismatch, compare_breakdowns,
    verify_dashboard_row, verify_employee,
};
