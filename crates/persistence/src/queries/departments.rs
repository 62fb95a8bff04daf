// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::diesel_schema::departments;
use crate::error::PersistenceError;
use leavedesk_domain::Department;

/// Diesel Queryable struct for department rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = departments)]
pub struct DepartmentRow {
    pub department_id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Self {
            department_id: Some(row.department_id),
            name: row.name,
            description: row.description,
        }
    }
}

/// Retrieves a department by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<Option<Department>, PersistenceError> {
    debug!(department_id, "Looking up department");

    let result: Result<DepartmentRow, diesel::result::Error> = departments::table
        .filter(departments::department_id.eq(department_id))
        .select(DepartmentRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all departments ordered by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_departments(conn: &mut SqliteConnection) -> Result<Vec<Department>, PersistenceError> {
    let rows: Vec<DepartmentRow> = departments::table
        .order(departments::department_id.asc())
        .select(DepartmentRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Department::from).collect())
}
