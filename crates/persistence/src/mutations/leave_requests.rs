// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::leave_requests;
use crate::error::PersistenceError;
use crate::mutations::{require_affected, require_id};
use leavedesk_domain::{LeaveRequest, format_iso_date};

fn iso_dates(request: &LeaveRequest) -> Result<(String, String), PersistenceError> {
    let start = format_iso_date(request.period.start())
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
    let end = format_iso_date(request.period.end())
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
    Ok((start, end))
}

/// Inserts a leave request and returns its new ID.
///
/// # Errors
///
/// Returns an error if the employee does not exist or the write fails.
pub fn insert_leave_request(
    conn: &mut SqliteConnection,
    request: &LeaveRequest,
) -> Result<i64, PersistenceError> {
    let employee_id: i64 = require_id(request.employee.employee_id, "Employee")?;
    let (start, end) = iso_dates(request)?;

    diesel::insert_into(leave_requests::table)
        .values((
            leave_requests::employee_id.eq(employee_id),
            leave_requests::start_date.eq(&start),
            leave_requests::end_date.eq(&end),
            leave_requests::status.eq(request.status.as_str()),
            leave_requests::reason.eq(&request.reason),
            leave_requests::manager_comment.eq(&request.manager_comment),
        ))
        .execute(conn)?;

    let leave_request_id: i64 = get_last_insert_rowid(conn)?;
    info!(
        leave_request_id,
        employee_id,
        %start,
        %end,
        "Leave request submitted"
    );
    Ok(leave_request_id)
}

/// Overwrites an existing leave request.
///
/// # Errors
///
/// Returns an error if no request has `leave_request_id` or the write fails.
pub fn update_leave_request(
    conn: &mut SqliteConnection,
    leave_request_id: i64,
    request: &LeaveRequest,
) -> Result<(), PersistenceError> {
    let employee_id: i64 = require_id(request.employee.employee_id, "Employee")?;
    let (start, end) = iso_dates(request)?;

    let affected: usize = diesel::update(leave_requests::table)
        .filter(leave_requests::leave_request_id.eq(leave_request_id))
        .set((
            leave_requests::employee_id.eq(employee_id),
            leave_requests::start_date.eq(&start),
            leave_requests::end_date.eq(&end),
            leave_requests::status.eq(request.status.as_str()),
            leave_requests::reason.eq(&request.reason),
            leave_requests::manager_comment.eq(&request.manager_comment),
        ))
        .execute(conn)?;

    require_affected(affected, "Leave request", leave_request_id)?;
    info!(
        leave_request_id,
        status = request.status.as_str(),
        "Leave request updated"
    );
    Ok(())
}

/// Deletes a leave request.
///
/// # Errors
///
/// Returns an error if no request has `leave_request_id`.
pub fn delete_leave_request(
    conn: &mut SqliteConnection,
    leave_request_id: i64,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::delete(leave_requests::table)
        .filter(leave_requests::leave_request_id.eq(leave_request_id))
        .execute(conn)?;

    require_affected(affected, "Leave request", leave_request_id)?;
    info!(leave_request_id, "Leave request deleted");
    Ok(())
}
