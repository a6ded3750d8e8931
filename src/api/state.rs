//! Application state for the stub `/Employees` API.
//!
//! This module defines the settings and the in-memory employee store shared
//! by all request handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::PayPolicy;
use crate::models::Employee;

/// Salary assigned to every new employee unless configured otherwise.
pub const DEFAULT_STUB_SALARY: u32 = 52_000;

/// Username that owns new employees unless the request names one.
pub const DEFAULT_STUB_USERNAME: &str = "TestUser";

/// Behaviour of the stub API.
#[derive(Debug, Clone)]
pub struct StubSettings {
    /// Pay policy used to fill in `gross`, `benefitsCost` and `net`.
    pub policy: PayPolicy,
    /// The `Authorization` header value that is accepted.
    pub token: String,
    /// Owner of new employees.
    pub username: String,
    /// Annual salary of new employees.
    pub salary: Decimal,
    /// Accept `POST /Employees` without a valid `Authorization` header.
    pub auth_bypass_on_create: bool,
}

impl StubSettings {
    /// Creates settings with the default salary and username.
    pub fn new(policy: PayPolicy, token: impl Into<String>) -> Self {
        Self {
            policy,
            token: token.into(),
            username: DEFAULT_STUB_USERNAME.to_string(),
            salary: Decimal::from(DEFAULT_STUB_SALARY),
            auth_bypass_on_create: false,
        }
    }

    /// Sets the salary of new employees.
    pub fn with_salary(mut self, salary: Decimal) -> Self {
        self.salary = salary;
        self
    }

    /// Reproduces the defect where employee creation skips authentication.
    pub fn with_auth_bypass_on_create(mut self, enabled: bool) -> Self {
        self.auth_bypass_on_create = enabled;
        self
    }
}

/// Shared application state.
///
/// Cloning is cheap; all clones see the same employee store.
#[derive(Clone)]
pub struct AppState {
    settings: Arc<StubSettings>,
    employees: Arc<RwLock<BTreeMap<Uuid, Employee>>>,
}

impl AppState {
    /// Creates an empty store with the given settings.
    pub fn new(settings: StubSettings) -> Self {
        Self {
            settings: Arc::new(settings),
            employees: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Returns the stub settings.
    pub fn settings(&self) -> &StubSettings {
        &self.settings
    }

    /// Returns the employee store.
    pub fn employees(&self) -> &RwLock<BTreeMap<Uuid, Employee>> {
        &self.employees
    }
}
