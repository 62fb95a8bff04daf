// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::translate_domain_error;
use crate::outcome::{Failure, Outcome, Success};
use crate::store::EntityStore;
use leavedesk_domain::{Department, validate_department};

pub fn department_not_found(department_id: i64) -> Failure {
    Failure::not_found(
        "Department not found",
        format!("No departments found with id of {department_id}"),
    )
}

/// Deletes a department that no employee references.
///
/// The employee check and the delete run inside
/// [`EntityStore::exclusive`], so an employee cannot be attached between
/// the two.
///
/// # Errors
///
/// - `NotFound` if the department does not exist
/// - `Conflict` if any employee still belongs to it; the store's delete is
///   not invoked
pub fn delete_department<S: EntityStore>(store: &mut S, department_id: i64) -> Outcome<()> {
    store.exclusive(|store| {
        let department = store
            .find_department(department_id)
            .map_err(|e| e.into_failure("Failed to load department"))?
            .ok_or_else(|| department_not_found(department_id))?;

        let employees = store
            .list_employees_in_department(department_id)
            .map_err(|e| e.into_failure("Failed to load department employees"))?;
        if !employees.is_empty() {
            return Err(Failure::conflict(
                "Cannot delete department with existing employees",
                format!(
                    "Department {} still has {} employees",
                    department.name,
                    employees.len()
                ),
            ));
        }

        store
            .delete_department(department_id)
            .map_err(|e| e.into_failure("Failed to delete department"))?;
        Ok(Success::new((), "Department was deleted"))
    })
}

/// Creates a department, or updates it when it carries an identifier.
///
/// # Errors
///
/// - `InvalidInput` if the name is blank
/// - `NotFound` when updating a department that does not exist
/// - `Conflict` if the name is already used by another department
/// - `Storage` if the store fails
pub fn save_department<S: EntityStore>(
    store: &mut S,
    department: &Department,
) -> Outcome<Department> {
    validate_department(department).map_err(|e| translate_domain_error(&e))?;

    store.exclusive(|store| {
        if let Some(department_id) = department.department_id {
            store
                .find_department(department_id)
                .map_err(|e| e.into_failure("Failed to load department"))?
                .ok_or_else(|| department_not_found(department_id))?;
        }

        let saved = store
            .save_department(department)
            .map_err(|e| e.into_failure("Department could not be saved."))?;
        Ok(Success::new(saved, "Department has been saved."))
    })
}

/// # Errors
///
/// Returns `NotFound` if the department does not exist.
pub fn get_department<S: EntityStore>(store: &mut S, department_id: i64) -> Outcome<Department> {
    let department = store
        .find_department(department_id)
        .map_err(|e| e.into_failure("Failed to load department"))?
        .ok_or_else(|| department_not_found(department_id))?;
    Ok(Success::new(department, "Department fetched successfully."))
}

/// # Errors
///
/// Returns `Storage` if the store cannot be read.
pub fn list_departments<S: EntityStore>(store: &mut S) -> Outcome<Vec<Department>> {
    let departments = store
        .list_departments()
        .map_err(|e| e.into_failure("Failed to list departments"))?;
    Ok(Success::new(departments, "Departments fetched successfully."))
}
