// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::employees;
use crate::error::PersistenceError;
use crate::mutations::{require_affected, require_id};
use leavedesk_domain::Employee;

/// Inserts an employee and returns its new ID.
///
/// # Errors
///
/// Returns `PersistenceError::ConstraintViolation` if the email is taken or
/// a reference does not exist.
pub fn insert_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<i64, PersistenceError> {
    let department_id: i64 = require_id(employee.department.department_id, "Department")?;

    diesel::insert_into(employees::table)
        .values((
            employees::name.eq(&employee.name),
            employees::email.eq(&employee.email),
            employees::department_id.eq(department_id),
            employees::role_id.eq(employee.role.role_id),
            employees::user_id.eq(employee.user.user_id),
        ))
        .execute(conn)?;

    let employee_id: i64 = get_last_insert_rowid(conn)?;
    info!(employee_id, department_id, "Employee created");
    Ok(employee_id)
}

/// Overwrites every column of an existing employee.
///
/// # Errors
///
/// Returns an error if no employee has `employee_id`, the email is taken
/// or a reference does not exist.
pub fn update_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    employee: &Employee,
) -> Result<(), PersistenceError> {
    let department_id: i64 = require_id(employee.department.department_id, "Department")?;

    let affected: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .set((
            employees::name.eq(&employee.name),
            employees::email.eq(&employee.email),
            employees::department_id.eq(department_id),
            employees::role_id.eq(employee.role.role_id),
            employees::user_id.eq(employee.user.user_id),
        ))
        .execute(conn)?;

    require_affected(affected, "Employee", employee_id)?;
    info!(employee_id, department_id, "Employee updated");
    Ok(())
}

/// Deletes an employee.
///
/// # Errors
///
/// Returns `PersistenceError::ConstraintViolation` if leave requests still
/// reference it.
pub fn delete_employee(conn: &mut SqliteConnection, employee_id: i64) -> Result<(), PersistenceError> {
    let affected: usize = diesel::delete(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .execute(conn)?;

    require_affected(affected, "Employee", employee_id)?;
    info!(employee_id, "Employee deleted");
    Ok(())
}
