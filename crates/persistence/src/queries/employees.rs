// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee queries.
//!
//! Employees are always returned with their department, business role and
//! login identity resolved. Department and role come from a single join;
//! the identity's authorization roles need a second query per employee.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::diesel_schema::{departments, employees, roles, users};
use crate::error::PersistenceError;
use crate::queries::departments::DepartmentRow;
use crate::queries::users::{RoleRow, get_roles_for_user};
use leavedesk_domain::{Employee, UserAccount};

/// Diesel Queryable struct for employee rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
struct EmployeeRow {
    employee_id: i64,
    name: String,
    email: String,
}

type JoinedRow = (EmployeeRow, DepartmentRow, RoleRow, (i64, String));

fn assemble(conn: &mut SqliteConnection, row: JoinedRow) -> Result<Employee, PersistenceError> {
    let (employee, department, role, (user_id, username)) = row;
    let user_roles = get_roles_for_user(conn, user_id)?;

    Ok(Employee {
        employee_id: Some(employee.employee_id),
        name: employee.name,
        email: employee.email,
        department: department.into(),
        role: role.into(),
        user: UserAccount {
            user_id,
            username,
            roles: user_roles,
        },
    })
}

fn assemble_all(
    conn: &mut SqliteConnection,
    rows: Vec<JoinedRow>,
) -> Result<Vec<Employee>, PersistenceError> {
    rows.into_iter().map(|row| assemble(conn, row)).collect()
}

/// Retrieves an employee by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Option<Employee>, PersistenceError> {
    debug!(employee_id, "Looking up employee");

    let result: Result<JoinedRow, diesel::result::Error> = employees::table
        .inner_join(departments::table)
        .inner_join(roles::table)
        .inner_join(users::table)
        .filter(employees::employee_id.eq(employee_id))
        .select((
            EmployeeRow::as_select(),
            DepartmentRow::as_select(),
            RoleRow::as_select(),
            (users::user_id, users::username),
        ))
        .first(conn);

    match result {
        Ok(row) => Ok(Some(assemble(conn, row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all employees ordered by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_employees(conn: &mut SqliteConnection) -> Result<Vec<Employee>, PersistenceError> {
    let rows: Vec<JoinedRow> = employees::table
        .inner_join(departments::table)
        .inner_join(roles::table)
        .inner_join(users::table)
        .order(employees::employee_id.asc())
        .select((
            EmployeeRow::as_select(),
            DepartmentRow::as_select(),
            RoleRow::as_select(),
            (users::user_id, users::username),
        ))
        .load(conn)?;

    assemble_all(conn, rows)
}

/// Lists the employees of a department ordered by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_employees_in_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<Vec<Employee>, PersistenceError> {
    debug!(department_id, "Listing employees in department");

    let rows: Vec<JoinedRow> = employees::table
        .inner_join(departments::table)
        .inner_join(roles::table)
        .inner_join(users::table)
        .filter(employees::department_id.eq(department_id))
        .order(employees::employee_id.asc())
        .select((
            EmployeeRow::as_select(),
            DepartmentRow::as_select(),
            RoleRow::as_select(),
            (users::user_id, users::username),
        ))
        .load(conn)?;

    assemble_all(conn, rows)
}
