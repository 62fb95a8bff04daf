// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations.
//!
//! Each operation converts a wire DTO into core input, runs the core
//! operation and converts the result back. Access control has already
//! happened by the time any of these run.

use leavedesk::{
    EmployeeDraft, EntityStore, Failure, LeaveDecision, LeaveSubmission, Outcome,
    translate_domain_error,
};
use leavedesk_domain::{Department, LeaveStatus, TransitionPolicy, parse_iso_date};
use leavedesk_persistence::Persistence;
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::auth::AuthenticationService;
use crate::error::ApiError;
use crate::request_response::{
    DepartmentInfo, DepartmentRequest, EmployeeInfo, EmployeeRequest, LeaveDecisionRequest,
    LeaveRequestInfo, LoginRequest, LoginResponse, RegisterRequest, SubmitLeaveRequest,
};
use crate::token::TokenService;

/// Message returned after a successful registration.
pub const REGISTERED_MESSAGE: &str = "New Employee registered";

fn id_mismatch(entity: &str) -> Failure {
    Failure::invalid_input(
        &format!("{entity} ID in the path does not match the ID in the request body."),
        "ID mismatch",
    )
}

fn convert<T, U: From<T>>(outcome: Outcome<T>) -> Outcome<U> {
    outcome.map(|success| success.map(U::from))
}

fn convert_all<T, U: From<T>>(outcome: Outcome<Vec<T>>) -> Outcome<Vec<U>> {
    outcome.map(|success| success.map(|items| items.into_iter().map(U::from).collect()))
}

// ============================================================================
// Authentication
// ============================================================================

/// Registers a login identity with the `EMPLOYEE` role.
///
/// # Errors
///
/// Returns `ApiError::UsernameTaken` for a registered username,
/// `ApiError::PasswordPolicyViolation` for a weak password and
/// `ApiError::Internal` if storage fails.
pub fn register(
    persistence: &mut Persistence,
    request: &RegisterRequest,
    bcrypt_cost: u32,
) -> Result<String, ApiError> {
    AuthenticationService::register(
        persistence,
        &request.username,
        &request.password,
        bcrypt_cost,
    )?;
    Ok(String::from(REGISTERED_MESSAGE))
}

/// Exchanges a username and password for a bearer token.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if the credentials are wrong.
pub fn login(
    persistence: &mut Persistence,
    tokens: &TokenService,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (access_token, _actor) = AuthenticationService::login(
        persistence,
        tokens,
        &request.username,
        &request.password,
        OffsetDateTime::now_utc(),
    )?;

    Ok(LoginResponse {
        access_token,
        token_type: String::from("Bearer"),
    })
}

// ============================================================================
// Departments
// ============================================================================

/// # Errors
///
/// Returns `Storage` if the store cannot be read.
pub fn list_departments<S: EntityStore>(store: &mut S) -> Outcome<Vec<DepartmentInfo>> {
    convert_all(leavedesk::list_departments(store))
}

/// # Errors
///
/// Returns `NotFound` if the department does not exist.
pub fn get_department<S: EntityStore>(store: &mut S, department_id: i64) -> Outcome<DepartmentInfo> {
    convert(leavedesk::get_department(store, department_id))
}

/// Creates a department. A body identifier is ignored.
///
/// # Errors
///
/// Returns `InvalidInput` for a blank name and `Conflict` for a taken name.
pub fn create_department<S: EntityStore>(
    store: &mut S,
    request: DepartmentRequest,
) -> Outcome<DepartmentInfo> {
    let department: Department = Department {
        department_id: None,
        name: request.name,
        description: request.description,
    };
    let outcome: Outcome<DepartmentInfo> =
        convert(leavedesk::save_department(store, &department));
    if let Ok(success) = &outcome {
        info!(department_id = success.data.department_id, "Department created");
    }
    outcome
}

/// Updates the department at `department_id`.
///
/// # Errors
///
/// Returns `InvalidInput` if the body carries a different identifier,
/// `NotFound` if the department does not exist and otherwise the errors of
/// [`create_department`].
pub fn update_department<S: EntityStore>(
    store: &mut S,
    department_id: i64,
    request: DepartmentRequest,
) -> Outcome<DepartmentInfo> {
    if request.department_id != Some(department_id) {
        return Err(id_mismatch("Department"));
    }

    convert(leavedesk::save_department(
        store,
        &Department {
            department_id: Some(department_id),
            name: request.name,
            description: request.description,
        },
    ))
}

/// # Errors
///
/// Returns `NotFound` if the department does not exist and `Conflict` if it
/// still has employees.
pub fn delete_department<S: EntityStore>(store: &mut S, department_id: i64) -> Outcome<()> {
    leavedesk::delete_department(store, department_id)
}

// ============================================================================
// Employees
// ============================================================================

fn draft_from(request: EmployeeRequest, employee_id: Option<i64>) -> EmployeeDraft {
    EmployeeDraft {
        employee_id,
        name: request.name,
        email: request.email,
        department_id: request.department_id,
        role_id: request.role_id,
        username: request.username,
    }
}

/// # Errors
///
/// Returns `Storage` if the store cannot be read.
pub fn list_employees<S: EntityStore>(store: &mut S) -> Outcome<Vec<EmployeeInfo>> {
    convert_all(leavedesk::list_employees(store))
}

/// # Errors
///
/// Returns `NotFound` if the employee does not exist.
pub fn get_employee<S: EntityStore>(store: &mut S, employee_id: i64) -> Outcome<EmployeeInfo> {
    convert(leavedesk::get_employee(store, employee_id))
}

/// # Errors
///
/// Returns `NotFound` if the department does not exist.
pub fn list_employees_in_department<S: EntityStore>(
    store: &mut S,
    department_id: i64,
) -> Outcome<Vec<EmployeeInfo>> {
    convert_all(leavedesk::list_employees_in_department(
        store,
        department_id,
    ))
}

/// Creates an employee. A body identifier is ignored.
///
/// # Errors
///
/// Returns the failures of the employee assembly service.
pub fn create_employee<S: EntityStore>(
    store: &mut S,
    request: EmployeeRequest,
) -> Outcome<EmployeeInfo> {
    convert(leavedesk::save_employee(store, draft_from(request, None)))
}

/// Updates the employee at `employee_id`.
///
/// # Errors
///
/// Returns `InvalidInput` if the body carries a different identifier and
/// otherwise the failures of the employee assembly service.
pub fn update_employee<S: EntityStore>(
    store: &mut S,
    employee_id: i64,
    request: EmployeeRequest,
) -> Outcome<EmployeeInfo> {
    if request.employee_id != Some(employee_id) {
        return Err(id_mismatch("Employee"));
    }

    convert(leavedesk::save_employee(
        store,
        draft_from(request, Some(employee_id)),
    ))
}

/// # Errors
///
/// Returns `NotFound` if the employee does not exist and `Conflict` if they
/// still own leave requests.
pub fn delete_employee<S: EntityStore>(store: &mut S, employee_id: i64) -> Outcome<()> {
    leavedesk::delete_employee(store, employee_id)
}

// ============================================================================
// Leave requests
// ============================================================================

fn parse_date(value: &str) -> Result<Date, Failure> {
    parse_iso_date(value).map_err(|e| translate_domain_error(&e))
}

/// # Errors
///
/// Returns `Storage` if the store cannot be read.
pub fn list_leave_requests<S: EntityStore>(store: &mut S) -> Outcome<Vec<LeaveRequestInfo>> {
    convert_all(leavedesk::list_leave_requests(store))
}

/// Submits a leave request for `employee_id`, judged against `today`.
///
/// # Errors
///
/// Returns `InvalidInput` for malformed dates and otherwise the failures of
/// the leave rule engine.
pub fn submit_leave_request<S: EntityStore>(
    store: &mut S,
    today: Date,
    employee_id: i64,
    request: SubmitLeaveRequest,
) -> Outcome<LeaveRequestInfo> {
    let submission: LeaveSubmission = LeaveSubmission {
        start_date: parse_date(&request.start_date)?,
        end_date: parse_date(&request.end_date)?,
        reason: request.reason,
        status: request
            .status
            .as_deref()
            .and_then(|status| status.parse::<LeaveStatus>().ok()),
    };

    convert(leavedesk::submit_leave_request(
        store,
        today,
        &submission,
        employee_id,
    ))
}

/// Applies a review decision to a leave request.
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown status and otherwise the failures
/// of the leave rule engine.
pub fn update_leave_request<S: EntityStore>(
    store: &mut S,
    policy: &dyn TransitionPolicy,
    leave_request_id: i64,
    request: LeaveDecisionRequest,
) -> Outcome<LeaveRequestInfo> {
    let status: LeaveStatus = request
        .status
        .parse::<LeaveStatus>()
        .map_err(|e| translate_domain_error(&e))?;

    convert(leavedesk::update_leave_request(
        store,
        policy,
        leave_request_id,
        LeaveDecision {
            status,
            manager_comment: request.manager_comment,
        },
    ))
}

/// # Errors
///
/// Returns `NotFound` if the leave request does not exist.
pub fn delete_leave_request<S: EntityStore>(store: &mut S, leave_request_id: i64) -> Outcome<()> {
    leavedesk::delete_leave_request(store, leave_request_id)
}

