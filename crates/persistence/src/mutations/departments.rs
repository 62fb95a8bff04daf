// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::departments;
use crate::error::PersistenceError;
use crate::mutations::require_affected;
use leavedesk_domain::Department;

/// Inserts a department and returns its new ID.
///
/// # Errors
///
/// Returns `PersistenceError::ConstraintViolation` if the name is taken.
pub fn insert_department(
    conn: &mut SqliteConnection,
    department: &Department,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(departments::table)
        .values((
            departments::name.eq(&department.name),
            departments::description.eq(&department.description),
        ))
        .execute(conn)?;

    let department_id: i64 = get_last_insert_rowid(conn)?;
    info!(department_id, name = %department.name, "Department created");
    Ok(department_id)
}

/// Overwrites the name and description of an existing department.
///
/// # Errors
///
/// Returns an error if no department has `department_id` or the new name
/// is taken.
pub fn update_department(
    conn: &mut SqliteConnection,
    department_id: i64,
    department: &Department,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(departments::table)
        .filter(departments::department_id.eq(department_id))
        .set((
            departments::name.eq(&department.name),
            departments::description.eq(&department.description),
        ))
        .execute(conn)?;

    require_affected(affected, "Department", department_id)?;
    info!(department_id, "Department updated");
    Ok(())
}

/// Deletes a department.
///
/// # Errors
///
/// Returns `PersistenceError::ConstraintViolation` if employees still
/// reference it.
pub fn delete_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::delete(departments::table)
        .filter(departments::department_id.eq(department_id))
        .execute(conn)?;

    require_affected(affected, "Department", department_id)?;
    info!(department_id, "Department deleted");
    Ok(())
}
