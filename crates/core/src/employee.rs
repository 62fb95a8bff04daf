// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee assembly service.
//!
//! Callers refer to an employee's department, business role and login
//! identity by identifier or username. Those references are resolved
//! against the store and the authoritative records replace whatever the
//! caller supplied before anything is saved.

use crate::department::department_not_found;
use crate::error::translate_domain_error;
use crate::outcome::{ErrorKind, Failure, Outcome, Success};
use crate::store::EntityStore;
use leavedesk_domain::{Employee, Role, UserAccount, validate_employee_fields};

/// Caller-supplied fields of an employee to create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    /// `Some` to update an existing employee.
    pub employee_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub department_id: Option<i64>,
    pub role_id: Option<i64>,
    pub username: Option<String>,
}

fn employee_not_found(employee_id: i64) -> Failure {
    Failure::not_found(
        "Employee not found.",
        format!("No employees found with id of: {employee_id}"),
    )
}

/// A reference the caller supplied that names no record is bad input, not a
/// missing resource.
fn unresolved_reference(failure: Failure, message: &str, detail: String) -> Failure {
    if failure.kind == ErrorKind::NotFound {
        Failure::invalid_input(message, detail)
    } else {
        failure
    }
}

/// Resolves the draft's references and saves the employee.
///
/// # Errors
///
/// - `InvalidInput` if the department, role or username is missing or does
///   not resolve, or if the name or email is invalid
/// - `NotFound` when updating an employee that does not exist
/// - `Conflict` if the email is already used by another employee
/// - `Storage` if the store fails
pub fn save_employee<S: EntityStore>(store: &mut S, draft: EmployeeDraft) -> Outcome<Employee> {
    let Some(department_id) = draft.department_id else {
        return Err(Failure::invalid_input(
            "Not a valid Department id",
            "Employee and department must not be null",
        ));
    };
    let Some(role_id) = draft.role_id else {
        return Err(Failure::invalid_input(
            "Not a valid Role id",
            "Employee role must not be null",
        ));
    };
    let Some(username) = draft.username else {
        return Err(Failure::invalid_input(
            "Not a valid username",
            "Employee user must not be null",
        ));
    };

    validate_employee_fields(&draft.name, &draft.email).map_err(|e| translate_domain_error(&e))?;

    if let Some(employee_id) = draft.employee_id {
        store
            .find_employee(employee_id)
            .map_err(|e| e.into_failure("Failed to load employee"))?
            .ok_or_else(|| employee_not_found(employee_id))?;
    }

    let department = store
        .find_department(department_id)
        .map_err(|e| e.into_failure("Error retrieving department"))?
        .ok_or_else(|| {
            Failure::invalid_input(
                "Failed to find department",
                format!("No department of id {department_id}"),
            )
        })?;

    let role = get_role(store, role_id)
        .map_err(|f| {
            unresolved_reference(f, "Failed to find role", format!("No role of id {role_id}"))
        })?
        .data;

    let user = get_user_by_username(store, &username)
        .map_err(|f| {
            unresolved_reference(
                f,
                "Failed to find username",
                format!("No username of {username}"),
            )
        })?
        .data;

    let employee = Employee {
        employee_id: draft.employee_id,
        name: draft.name,
        email: draft.email,
        department,
        role,
        user,
    };

    let saved = store
        .save_employee(&employee)
        .map_err(|e| e.into_failure("Failed to save employee"))?;
    Ok(Success::new(saved, "Employee saved successfully!"))
}

/// # Errors
///
/// Returns `NotFound` if the employee does not exist.
pub fn get_employee<S: EntityStore>(store: &mut S, employee_id: i64) -> Outcome<Employee> {
    let employee = store
        .find_employee(employee_id)
        .map_err(|e| e.into_failure("Failed to load employee"))?
        .ok_or_else(|| employee_not_found(employee_id))?;
    Ok(Success::new(employee, "Employee found!"))
}

/// # Errors
///
/// Returns `Storage` if the store cannot be read.
pub fn list_employees<S: EntityStore>(store: &mut S) -> Outcome<Vec<Employee>> {
    let employees = store
        .list_employees()
        .map_err(|e| e.into_failure("Failed to list employees"))?;
    Ok(Success::new(employees, "Employees fetched successfully."))
}

/// Lists the employees of one department. An empty department yields an
/// empty list.
///
/// # Errors
///
/// Returns `NotFound` if the department does not exist.
pub fn list_employees_in_department<S: EntityStore>(
    store: &mut S,
    department_id: i64,
) -> Outcome<Vec<Employee>> {
    let department = store
        .find_department(department_id)
        .map_err(|e| e.into_failure("Failed to load department"))?
        .ok_or_else(|| department_not_found(department_id))?;

    let employees = store
        .list_employees_in_department(department_id)
        .map_err(|e| e.into_failure("Failed to list employees"))?;
    Ok(Success::new(
        employees,
        &format!(
            "Employees fetched successfully for department: {}",
            department.name
        ),
    ))
}

/// Deletes an employee that owns no leave requests.
///
/// # Errors
///
/// - `NotFound` if the employee does not exist
/// - `Conflict` if the employee still owns leave requests
pub fn delete_employee<S: EntityStore>(store: &mut S, employee_id: i64) -> Outcome<()> {
    store.exclusive(|store| {
        store
            .find_employee(employee_id)
            .map_err(|e| e.into_failure("Failed to load employee"))?
            .ok_or_else(|| employee_not_found(employee_id))?;

        let owned = store
            .count_leave_requests_for_employee(employee_id)
            .map_err(|e| e.into_failure("Failed to load leave requests"))?;
        if owned > 0 {
            return Err(Failure::conflict(
                "Cannot delete employee with existing leave requests",
                format!("Employee {employee_id} still has {owned} leave requests"),
            ));
        }

        store
            .delete_employee(employee_id)
            .map_err(|e| e.into_failure("Failed to delete employee"))?;
        Ok(Success::new((), "Employee was deleted!"))
    })
}

/// # Errors
///
/// Returns `NotFound` if no role has `role_id`.
pub fn get_role<S: EntityStore>(store: &mut S, role_id: i64) -> Outcome<Role> {
    let role = store
        .find_role(role_id)
        .map_err(|e| e.into_failure("Failed to load role"))?
        .ok_or_else(|| {
            Failure::not_found("Role not found.", format!("No Role found with id of {role_id}"))
        })?;
    Ok(Success::new(role, "Role fetched successfully."))
}

/// # Errors
///
/// Returns `NotFound` if no login identity has `username`.
pub fn get_user_by_username<S: EntityStore>(
    store: &mut S,
    username: &str,
) -> Outcome<UserAccount> {
    let user = store
        .find_user_by_username(username)
        .map_err(|e| e.into_failure("Failed to load user"))?
        .ok_or_else(|| {
            Failure::not_found(
                "No user found with that username.",
                format!("No user found with username {username}"),
            )
        })?;
    Ok(Success::new(user, "User fetched successfully."))
}
