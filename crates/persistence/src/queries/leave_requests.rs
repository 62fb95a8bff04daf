// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave request queries.
//!
//! Dates are stored as `YYYY-MM-DD` text, so lexical comparison in SQL
//! matches calendar order.

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

use crate::diesel_schema::leave_requests;
use crate::error::PersistenceError;
use crate::queries::employees::get_employee;
use leavedesk_domain::{
    DateRange, Employee, LeaveRequest, LeaveStatus, format_iso_date, parse_iso_date,
};

/// Diesel Queryable struct for leave request rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = leave_requests)]
struct LeaveRequestRow {
    leave_request_id: i64,
    employee_id: i64,
    start_date: String,
    end_date: String,
    status: String,
    reason: String,
    manager_comment: Option<String>,
}

/// Converts rows to domain values, loading each distinct employee once.
fn assemble(
    conn: &mut SqliteConnection,
    rows: Vec<LeaveRequestRow>,
) -> Result<Vec<LeaveRequest>, PersistenceError> {
    let mut employees: HashMap<i64, Employee> = HashMap::new();
    let mut requests: Vec<LeaveRequest> = Vec::with_capacity(rows.len());

    for row in rows {
        let employee: Employee = if let Some(employee) = employees.get(&row.employee_id) {
            employee.clone()
        } else {
            let employee: Employee = get_employee(conn, row.employee_id)?.ok_or_else(|| {
                PersistenceError::NotFound(format!(
                    "Employee {} referenced by leave request {}",
                    row.employee_id, row.leave_request_id
                ))
            })?;
            employees.insert(row.employee_id, employee.clone());
            employee
        };

        let start = parse_iso_date(&row.start_date)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let end = parse_iso_date(&row.end_date)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let status = LeaveStatus::from_str(&row.status)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

        requests.push(LeaveRequest {
            leave_request_id: Some(row.leave_request_id),
            employee,
            period: DateRange::new(start, end),
            status,
            reason: row.reason,
            manager_comment: row.manager_comment,
        });
    }

    Ok(requests)
}

/// Retrieves a leave request by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn get_leave_request(
    conn: &mut SqliteConnection,
    leave_request_id: i64,
) -> Result<Option<LeaveRequest>, PersistenceError> {
    debug!(leave_request_id, "Looking up leave request");

    let result: Result<LeaveRequestRow, diesel::result::Error> = leave_requests::table
        .filter(leave_requests::leave_request_id.eq(leave_request_id))
        .select(LeaveRequestRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(assemble(conn, vec![row])?.pop()),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all leave requests ordered by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_leave_requests(
    conn: &mut SqliteConnection,
) -> Result<Vec<LeaveRequest>, PersistenceError> {
    let rows: Vec<LeaveRequestRow> = leave_requests::table
        .order(leave_requests::leave_request_id.asc())
        .select(LeaveRequestRow::as_select())
        .load(conn)?;

    assemble(conn, rows)
}

/// Finds an employee's approved requests that share at least one day with
/// `period`.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn find_overlapping_approved(
    conn: &mut SqliteConnection,
    employee_id: i64,
    period: DateRange,
) -> Result<Vec<LeaveRequest>, PersistenceError> {
    let start: String = format_iso_date(period.start())
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
    let end: String = format_iso_date(period.end())
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

    debug!(employee_id, %start, %end, "Checking for overlapping approved leave");

    let rows: Vec<LeaveRequestRow> = leave_requests::table
        .filter(leave_requests::employee_id.eq(employee_id))
        .filter(leave_requests::status.eq(LeaveStatus::Approved.as_str()))
        .filter(leave_requests::start_date.le(&end))
        .filter(leave_requests::end_date.ge(&start))
        .order(leave_requests::leave_request_id.asc())
        .select(LeaveRequestRow::as_select())
        .load(conn)?;

    assemble(conn, rows)
}

/// Counts the leave requests of every status owned by an employee.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_leave_requests_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<usize, PersistenceError> {
    let count: i64 = leave_requests::table
        .filter(leave_requests::employee_id.eq(employee_id))
        .count()
        .get_result(conn)?;

    usize::try_from(count).map_err(|e| PersistenceError::SerializationError(e.to_string()))
}
