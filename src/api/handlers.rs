//! HTTP request handlers for the stub `/Employees` API.
//!
//! The stub behaves like the payroll system under test: it stores employees
//! in memory and fills in the per-paycheck amounts with the benefits oracle.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    routing::get,
};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_paycheck;
use crate::config::PayPolicy;
use crate::error::OracleError;
use crate::models::{Employee, EmployeeDraft};

use super::request::{authorize, draft_from_payload, parse_employee_id};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/Employees",
            get(list_handler).post(create_handler).put(update_handler),
        )
        .route("/api/Employees/:id", get(get_handler).delete(delete_handler))
        .with_state(state)
}

/// Handler for GET /api/Employees.
async fn list_handler(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Vec<Employee>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Listing employees");

    authorize(state.settings(), &headers).inspect_err(|_| rejected(correlation_id))?;

    let employees: Vec<Employee> = state.employees().read().await.values().cloned().collect();
    info!(
        correlation_id = %correlation_id,
        count = employees.len(),
        "Employees listed"
    );
    Ok(Json(employees))
}

/// Handler for POST /api/Employees.
///
/// Authentication is skipped when the stub reproduces the create bypass.
async fn create_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<EmployeeDraft>, JsonRejection>,
) -> ApiResult<Employee> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create request");

    let settings = state.settings();
    if !settings.auth_bypass_on_create {
        authorize(settings, &headers).inspect_err(|_| rejected(correlation_id))?;
    }

    let draft = draft_from_payload(payload).inspect_err(|err| invalid(correlation_id, err))?;
    draft
        .validate()
        .map_err(ApiErrorResponse::from)
        .inspect_err(|err| invalid(correlation_id, err))?;

    let id = Uuid::new_v4();
    let username = draft
        .username
        .clone()
        .unwrap_or_else(|| settings.username.clone());
    let employee = build_employee(id, username, &draft, settings.salary, &settings.policy);

    state.employees().write().await.insert(id, employee.clone());

    info!(
        correlation_id = %correlation_id,
        employee_id = %id,
        dependants = employee.dependants,
        net = %employee.net,
        "Employee created"
    );
    Ok(Json(employee))
}

/// Handler for PUT /api/Employees.
///
/// Replaces the names and dependants of an existing employee. Keys,
/// owner and salary are kept; pay amounts are recomputed.
async fn update_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<EmployeeDraft>, JsonRejection>,
) -> ApiResult<Employee> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing update request");

    let settings = state.settings();
    authorize(settings, &headers).inspect_err(|_| rejected(correlation_id))?;

    let draft = draft_from_payload(payload).inspect_err(|err| invalid(correlation_id, err))?;
    let raw_id = draft.id.as_deref().ok_or_else(|| {
        ApiErrorResponse::new(
            StatusCode::BAD_REQUEST,
            ApiError::validation_error("missing field `id`"),
        )
    })?;
    let id = parse_employee_id(raw_id).inspect_err(|err| invalid(correlation_id, err))?;
    draft
        .validate()
        .map_err(ApiErrorResponse::from)
        .inspect_err(|err| invalid(correlation_id, err))?;

    let mut employees = state.employees().write().await;
    let Some(existing) = employees.get_mut(&id) else {
        return Err(not_found(correlation_id, raw_id));
    };

    *existing = build_employee(
        id,
        existing.username.clone(),
        &draft,
        existing.salary,
        &settings.policy,
    );

    info!(
        correlation_id = %correlation_id,
        employee_id = %id,
        dependants = existing.dependants,
        net = %existing.net,
        "Employee updated"
    );
    Ok(Json(existing.clone()))
}

/// Handler for GET /api/Employees/:id.
async fn get_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> ApiResult<Employee> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %raw_id, "Fetching employee");

    authorize(state.settings(), &headers).inspect_err(|_| rejected(correlation_id))?;
    let id = parse_employee_id(&raw_id).inspect_err(|err| invalid(correlation_id, err))?;

    match state.employees().read().await.get(&id) {
        Some(employee) => Ok(Json(employee.clone())),
        None => Err(not_found(correlation_id, &raw_id)),
    }
}

/// Handler for DELETE /api/Employees/:id.
async fn delete_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %raw_id, "Deleting employee");

    authorize(state.settings(), &headers).inspect_err(|_| rejected(correlation_id))?;
    let id = parse_employee_id(&raw_id).inspect_err(|err| invalid(correlation_id, err))?;

    match state.employees().write().await.remove(&id) {
        Some(_) => {
            info!(correlation_id = %correlation_id, employee_id = %id, "Employee deleted");
            Ok(StatusCode::OK)
        }
        None => Err(not_found(correlation_id, &raw_id)),
    }
}

fn not_found(correlation_id: Uuid, raw_id: &str) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, employee_id = %raw_id, "Employee not found");
    OracleError::EmployeeNotFound {
        id: raw_id.to_string(),
    }
    .into()
}

fn rejected(correlation_id: Uuid) {
    warn!(correlation_id = %correlation_id, "Missing or invalid Authorization header");
}

fn invalid(correlation_id: Uuid, err: &ApiErrorResponse) {
    warn!(
        correlation_id = %correlation_id,
        code = %err.error.code,
        error = %err.error.message,
        "Request rejected"
    );
}

/// Builds a stored record with pay amounts from the benefits oracle.
fn build_employee(
    id: Uuid,
    username: String,
    draft: &EmployeeDraft,
    salary: Decimal,
    policy: &PayPolicy,
) -> Employee {
    let breakdown = calculate_paycheck(salary, draft.dependants, policy);

    Employee {
        partition_key: username.clone(),
        sort_key: id.to_string(),
        username,
        id: id.to_string(),
        first_name: draft.first_name.clone(),
        last_name: draft.last_name.clone(),
        dependants: draft.dependants,
        salary,
        gross: breakdown.gross,
        benefits_cost: breakdown.benefits_cost,
        net: breakdown.net,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    fn policy() -> PayPolicy {
        PayPolicy::new(
            NonZeroU32::new(26).unwrap(),
            Decimal::from(1000),
            Decimal::from(500),
        )
        .unwrap()
    }

    #[test]
    fn test_build_employee_keys_follow_owner_and_id() {
        let id = Uuid::new_v4();
        let draft = EmployeeDraft::new("Jane", "Smith", 2);
        let employee = build_employee(
            id,
            "TestUser".to_string(),
            &draft,
            Decimal::from(52_000),
            &policy(),
        );

        assert_eq!(employee.partition_key, "TestUser");
        assert_eq!(employee.sort_key, id.to_string());
        assert_eq!(employee.id, id.to_string());
        assert_eq!(employee.dependants, 2);
        assert!(employee.validate().is_ok());
    }

    #[test]
    fn test_build_employee_uses_oracle_amounts() {
        let draft = EmployeeDraft::new("Jane", "Smith", 2);
        let employee = build_employee(
            Uuid::new_v4(),
            "TestUser".to_string(),
            &draft,
            Decimal::from(52_000),
            &policy(),
        );

        assert_eq!(employee.gross, Decimal::from(2000));
        assert_eq!(employee.benefits_cost, Decimal::new(7692308, 5));
        assert_eq!(employee.net, Decimal::new(19230770, 4));
    }
}
