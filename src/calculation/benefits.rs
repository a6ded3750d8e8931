//! Per-paycheck benefits calculation.
//!
//! This is the oracle every check is measured against: given an annual
//! salary, a dependant count and the pay policy, it produces the gross pay,
//! benefits cost and net pay of one paycheck.

use rust_decimal::Decimal;

use crate::config::PayPolicy;
use crate::models::{AuditStep, PaycheckBreakdown};

use super::rounding::{ceil_net_pay, round_benefits_cost};

/// Rule identifier of the employee benefit step.
pub const RULE_EMPLOYEE_BENEFIT: &str = "employee_benefit";
/// Rule identifier of the dependant benefit step.
pub const RULE_DEPENDANT_BENEFIT: &str = "dependant_benefit";
/// Rule identifier of the benefits cost rounding step.
pub const RULE_BENEFITS_COST: &str = "benefits_cost";
/// Rule identifier of the gross pay step.
pub const RULE_GROSS_PAY: &str = "gross_pay";
/// Rule identifier of the net pay step.
pub const RULE_NET_PAY: &str = "net_pay";

/// The result of a benefits calculation with its audit trail.
#[derive(Debug, Clone)]
pub struct PaycheckCalculationResult {
    /// The per-paycheck amounts.
    pub breakdown: PaycheckBreakdown,
    /// One audit step per calculation step, in order.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates the per-paycheck amounts for an employee.
///
/// 1. employee benefit per paycheck = yearly employee cost / pay periods
/// 2. dependant benefit per paycheck = yearly dependant cost * dependants / pay periods
///    (skipped entirely when there are no dependants)
/// 3. benefits cost = (1) + (2), rounded half away from zero to 5 places
/// 4. gross = salary / pay periods, unrounded
/// 5. net = gross - benefits cost, rounded up to 4 places
///
/// Inputs are not validated; salary and rates are expected to be
/// non-negative and dependants at most 32. The calculation never fails.
///
/// # Examples
///
/// ```
/// use benefits_oracle::calculation::calculate_paycheck;
/// use benefits_oracle::config::PayPolicy;
/// use rust_decimal::Decimal;
/// use std::num::NonZeroU32;
/// use std::str::FromStr;
///
/// let policy = PayPolicy::new(
///     NonZeroU32::new(26).unwrap(),
///     Decimal::from(1000),
///     Decimal::from(500),
/// )
/// .unwrap();
///
/// let breakdown = calculate_paycheck(Decimal::from(52000), 1, &policy);
/// assert_eq!(breakdown.gross, Decimal::from(2000));
/// assert_eq!(breakdown.benefits_cost, Decimal::from_str("57.69231").unwrap());
/// assert_eq!(breakdown.net, Decimal::from_str("1942.3077").unwrap());
/// ```
pub fn calculate_paycheck(salary: Decimal, dependants: u32, policy: &PayPolicy) -> PaycheckBreakdown {
    let periods = policy.pay_periods_divisor();

    let employee_benefit = employee_benefit_per_paycheck(policy, periods);
    let benefits_cost = match dependant_benefit_per_paycheck(policy, dependants, periods) {
        Some(dependant_benefit) => round_benefits_cost(employee_benefit + dependant_benefit),
        None => round_benefits_cost(employee_benefit),
    };
    let gross = salary / periods;
    let net = ceil_net_pay(gross - benefits_cost);

    PaycheckBreakdown {
        gross,
        benefits_cost,
        net,
    }
}

/// Calculates the per-paycheck amounts and records every step.
///
/// The breakdown is identical to [`calculate_paycheck`]. Step numbers start
/// at `step_number`.
///
/// # Examples
///
/// ```
/// use benefits_oracle::calculation::calculate_paycheck_with_audit;
/// use benefits_oracle::config::PayPolicy;
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
/// let result = calculate_paycheck_with_audit(Decimal::from(52000), 0, &policy, 1);
/// assert_eq!(result.audit_steps.len(), 5);
/// assert_eq!(result.audit_steps[4].rule_id, "net_pay");
/// ```
pub fn calculate_paycheck_with_audit(
    salary: Decimal,
    dependants: u32,
    policy: &PayPolicy,
    step_number: u32,
) -> PaycheckCalculationResult {
    let periods = policy.pay_periods_divisor();
    let breakdown = calculate_paycheck(salary, dependants, policy);
    let employee_benefit = employee_benefit_per_paycheck(policy, periods);
    let dependant_benefit =
        dependant_benefit_per_paycheck(policy, dependants, periods).unwrap_or(Decimal::ZERO);

    let audit_steps = vec![
        AuditStep {
            step_number,
            rule_id: RULE_EMPLOYEE_BENEFIT.to_string(),
            rule_name: "Employee Benefit Per Paycheck".to_string(),
            input: serde_json::json!({
                "employee_benefit_cost_per_year": policy.employee_benefit_cost_per_year().normalize().to_string(),
                "pay_periods_per_year": policy.pay_periods_per_year().get()
            }),
            output: serde_json::json!({
                "employee_benefit_per_paycheck": employee_benefit.normalize().to_string()
            }),
            reasoning: format!(
                "${} / {} = ${}",
                policy.employee_benefit_cost_per_year().normalize(),
                periods,
                employee_benefit.normalize()
            ),
        },
        AuditStep {
            step_number: step_number + 1,
            rule_id: RULE_DEPENDANT_BENEFIT.to_string(),
            rule_name: "Dependant Benefit Per Paycheck".to_string(),
            input: serde_json::json!({
                "dependant_benefit_cost_per_year": policy.dependant_benefit_cost_per_year().normalize().to_string(),
                "dependants": dependants,
                "pay_periods_per_year": policy.pay_periods_per_year().get()
            }),
            output: serde_json::json!({
                "dependant_benefit_per_paycheck": dependant_benefit.normalize().to_string(),
                "applied": dependants > 0
            }),
            reasoning: if dependants == 0 {
                "No dependants - dependant benefit not applied".to_string()
            } else {
                format!(
                    "${} x {} / {} = ${}",
                    policy.dependant_benefit_cost_per_year().normalize(),
                    dependants,
                    periods,
                    dependant_benefit.normalize()
                )
            },
        },
        AuditStep {
            step_number: step_number + 2,
            rule_id: RULE_BENEFITS_COST.to_string(),
            rule_name: "Benefits Cost Per Paycheck".to_string(),
            input: serde_json::json!({
                "employee_benefit_per_paycheck": employee_benefit.normalize().to_string(),
                "dependant_benefit_per_paycheck": dependant_benefit.normalize().to_string()
            }),
            output: serde_json::json!({
                "benefits_cost": breakdown.benefits_cost.normalize().to_string()
            }),
            reasoning: format!(
                "round5(${} + ${}) = ${}",
                employee_benefit.normalize(),
                dependant_benefit.normalize(),
                breakdown.benefits_cost.normalize()
            ),
        },
        AuditStep {
            step_number: step_number + 3,
            rule_id: RULE_GROSS_PAY.to_string(),
            rule_name: "Gross Pay Per Paycheck".to_string(),
            input: serde_json::json!({
                "salary": salary.normalize().to_string(),
                "pay_periods_per_year": policy.pay_periods_per_year().get()
            }),
            output: serde_json::json!({
                "gross": breakdown.gross.normalize().to_string()
            }),
            reasoning: format!(
                "${} / {} = ${}",
                salary.normalize(),
                periods,
                breakdown.gross.normalize()
            ),
        },
        AuditStep {
            step_number: step_number + 4,
            rule_id: RULE_NET_PAY.to_string(),
            rule_name: "Net Pay Per Paycheck".to_string(),
            input: serde_json::json!({
                "gross": breakdown.gross.normalize().to_string(),
                "benefits_cost": breakdown.benefits_cost.normalize().to_string()
            }),
            output: serde_json::json!({
                "net": breakdown.net.normalize().to_string()
            }),
            reasoning: format!(
                "ceil4(${} - ${}) = ${}",
                breakdown.gross.normalize(),
                breakdown.benefits_cost.normalize(),
                breakdown.net.normalize()
            ),
        },
    ];

    PaycheckCalculationResult {
        breakdown,
        audit_steps,
    }
}

fn employee_benefit_per_paycheck(policy: &PayPolicy, periods: Decimal) -> Decimal {
    policy.employee_benefit_cost_per_year() / periods
}

fn dependant_benefit_per_paycheck(
    policy: &PayPolicy,
    dependants: u32,
    periods: Decimal,
) -> Option<Decimal> {
    if dependants == 0 {
        return None;
    }
    Some(policy.dependant_benefit_cost_per_year() * Decimal::from(dependants) / periods)
}
