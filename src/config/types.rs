//! Configuration types for the benefits oracle.
//!
//! This module contains the strongly-typed configuration structures that
//! are built from environment variables or deserialized from a YAML file.

use std::fmt;
use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{OracleError, OracleResult};

/// The number of pay periods per year observed in the system under test (biweekly).
pub const DEFAULT_PAY_PERIODS_PER_YEAR: u32 = 26;

/// Default tolerance when comparing API numbers against the oracle (`0.000000001`).
///
/// The API serializes numbers as binary doubles, so long quotients such as
/// `50000 / 26` only survive to about 16 significant digits.
pub fn default_api_tolerance() -> Decimal {
    Decimal::new(1, 9)
}

/// The pay and benefit rates the calculator is driven by.
///
/// A policy is built once per process and passed explicitly to every
/// calculation. The pay-period count is a [`NonZeroU32`] so the divisor can
/// never be zero.
///
/// # Example
///
/// ```
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
/// assert_eq!(policy.pay_periods_per_year().get(), 26);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayPolicy {
    pay_periods_per_year: NonZeroU32,
    employee_benefit_cost_per_year: Decimal,
    dependant_benefit_cost_per_year: Decimal,
}

impl PayPolicy {
    /// Creates a policy, rejecting negative benefit costs.
    pub fn new(
        pay_periods_per_year: NonZeroU32,
        employee_benefit_cost_per_year: Decimal,
        dependant_benefit_cost_per_year: Decimal,
    ) -> OracleResult<Self> {
        if employee_benefit_cost_per_year < Decimal::ZERO {
            return Err(OracleError::InvalidSetting {
                name: "employee_benefit_cost_per_year".to_string(),
                message: format!("must not be negative, got {}", employee_benefit_cost_per_year),
            });
        }
        if dependant_benefit_cost_per_year < Decimal::ZERO {
            return Err(OracleError::InvalidSetting {
                name: "dependant_benefit_cost_per_year".to_string(),
                message: format!(
                    "must not be negative, got {}",
                    dependant_benefit_cost_per_year
                ),
            });
        }

        Ok(Self {
            pay_periods_per_year,
            employee_benefit_cost_per_year,
            dependant_benefit_cost_per_year,
        })
    }

    /// Returns the number of pay periods per year.
    pub fn pay_periods_per_year(&self) -> NonZeroU32 {
        self.pay_periods_per_year
    }

    /// Returns the pay-period count as a decimal divisor.
    pub fn pay_periods_divisor(&self) -> Decimal {
        Decimal::from(self.pay_periods_per_year.get())
    }

    /// Returns the yearly cost of the employee's own benefits.
    pub fn employee_benefit_cost_per_year(&self) -> Decimal {
        self.employee_benefit_cost_per_year
    }

    /// Returns the yearly cost of benefits for each dependant.
    pub fn dependant_benefit_cost_per_year(&self) -> Decimal {
        self.dependant_benefit_cost_per_year
    }
}

/// Where the system under test lives and how to authenticate against it.
///
/// Only `api_url` and `basic_token` are used by the API contract suite. The
/// remaining fields describe the browser-facing collaborator.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Endpoints {
    /// Base URL of the REST API (requests go to `{api_url}/Employees`).
    pub api_url: String,
    /// The `Authorization` header value, sent verbatim.
    pub basic_token: String,
    /// URL of the benefits dashboard.
    #[serde(default)]
    pub base_url: Option<String>,
    /// URL of the login page.
    #[serde(default)]
    pub login_url: Option<String>,
    /// Dashboard login name.
    #[serde(default)]
    pub username: Option<String>,
    /// Dashboard password.
    #[serde(default)]
    pub password: Option<String>,
}

impl fmt::Debug for Endpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoints")
            .field("api_url", &self.api_url)
            .field("basic_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("login_url", &self.login_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// The complete, immutable configuration of a suite run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Pay and benefit rates.
    pub policy: PayPolicy,
    /// The system under test.
    pub endpoints: Endpoints,
    /// Largest accepted difference between an API number and the oracle.
    pub api_tolerance: Decimal,
}

/// Pay policy section of the YAML configuration file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PolicySection {
    pub pay_periods_per_year: u32,
    pub employee_benefit_cost_per_year: Decimal,
    pub dependant_benefit_cost_per_year: Decimal,
}

/// Layout of the YAML configuration file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ConfigFile {
    pub policy: PolicySection,
    pub endpoints: Endpoints,
    #[serde(default)]
    pub api_tolerance: Option<Decimal>,
}
