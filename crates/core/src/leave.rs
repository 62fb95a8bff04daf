// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave request rule engine.
//!
//! Submission checks run in a fixed order and stop at the first failure:
//! employee existence, start date not in the past, end not before start,
//! then overlap with the employee's approved leave. The overlap check and
//! the insert run inside [`EntityStore::exclusive`].

use crate::error::translate_domain_error;
use crate::outcome::{Failure, Outcome, Success};
use crate::store::EntityStore;
use leavedesk_domain::{LeaveRequest, LeaveStatus, TransitionPolicy, validate_leave_period};
use time::Date;

/// Caller-supplied fields of a new leave request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveSubmission {
    pub start_date: Date,
    pub end_date: Date,
    pub reason: String,
    /// Ignored; every submission starts `PENDING`.
    pub status: Option<LeaveStatus>,
}

/// A reviewer's decision on an existing leave request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveDecision {
    pub status: LeaveStatus,
    /// Replaces the stored comment only when present.
    pub manager_comment: Option<String>,
}

fn leave_request_not_found(leave_request_id: i64) -> Failure {
    Failure::not_found(
        "Leave request not found.",
        format!("No leave request found with id: {leave_request_id}"),
    )
}

fn overlapping_leave() -> Failure {
    Failure::conflict(
        "Overlapping leave request",
        "An approved leave request already exists for these dates",
    )
}

/// Submits a leave request on behalf of an employee.
///
/// # Errors
///
/// - `NotFound` if `employee_id` does not resolve
/// - `InvalidInput` if the start date precedes `today` or the end date
///   precedes the start date
/// - `Conflict` if an approved request of the same employee overlaps
/// - `Storage` if the store fails
pub fn submit_leave_request<S: EntityStore>(
    store: &mut S,
    today: Date,
    submission: &LeaveSubmission,
    employee_id: i64,
) -> Outcome<LeaveRequest> {
    let employee = store
        .find_employee(employee_id)
        .map_err(|e| e.into_failure("Failed to load employee"))?
        .ok_or_else(|| {
            Failure::not_found(
                "Employee not found",
                format!("No employee found with ID: {employee_id}"),
            )
        })?;

    let period = validate_leave_period(submission.start_date, submission.end_date, today)
        .map_err(|e| translate_domain_error(&e))?;

    // Caller-supplied status is discarded here
    let request = LeaveRequest::new(employee, period, &submission.reason);

    store.exclusive(|store| {
        let overlapping = store
            .find_overlapping_approved(employee_id, period)
            .map_err(|e| e.into_failure("Failed to check for overlapping leave"))?;
        if !overlapping.is_empty() {
            return Err(overlapping_leave());
        }

        let saved = store
            .save_leave_request(&request)
            .map_err(|e| e.into_failure("Failed to submit leave request"))?;
        Ok(Success::new(saved, "Leave request submitted successfully!"))
    })
}

/// Applies a reviewer's decision to an existing request.
///
/// Only the status and, when supplied, the manager comment change. The
/// transition is checked by `policy`. Approving a request also re-checks
/// the overlap rule against the employee's other approved requests.
///
/// # Errors
///
/// - `NotFound` if no request has `leave_request_id`
/// - `Conflict` if `policy` refuses the transition or approval would
///   overlap another approved request
/// - `Storage` if the store fails
pub fn update_leave_request<S: EntityStore>(
    store: &mut S,
    policy: &dyn TransitionPolicy,
    leave_request_id: i64,
    decision: LeaveDecision,
) -> Outcome<LeaveRequest> {
    store.exclusive(|store| {
        let mut existing = store
            .find_leave_request(leave_request_id)
            .map_err(|e| e.into_failure("Failed to load leave request"))?
            .ok_or_else(|| leave_request_not_found(leave_request_id))?;

        policy
            .check(existing.status, decision.status)
            .map_err(|e| translate_domain_error(&e))?;

        if decision.status == LeaveStatus::Approved {
            let employee_id = existing.employee.employee_id.unwrap_or_default();
            let others = store
                .find_overlapping_approved(employee_id, existing.period)
                .map_err(|e| e.into_failure("Failed to check for overlapping leave"))?;
            if others
                .iter()
                .any(|other| other.leave_request_id != Some(leave_request_id))
            {
                return Err(overlapping_leave());
            }
        }

        existing.status = decision.status;
        if let Some(comment) = decision.manager_comment {
            existing.manager_comment = Some(comment);
        }

        let saved = store
            .save_leave_request(&existing)
            .map_err(|e| e.into_failure("Failed to update leave request"))?;
        Ok(Success::new(saved, "Leave request updated successfully."))
    })
}

/// Deletes a leave request.
///
/// # Errors
///
/// Returns `NotFound` if no request has `leave_request_id`.
pub fn delete_leave_request<S: EntityStore>(
    store: &mut S,
    leave_request_id: i64,
) -> Outcome<()> {
    store.exclusive(|store| {
        if store
            .find_leave_request(leave_request_id)
            .map_err(|e| e.into_failure("Failed to load leave request"))?
            .is_none()
        {
            return Err(leave_request_not_found(leave_request_id));
        }

        store
            .delete_leave_request(leave_request_id)
            .map_err(|e| e.into_failure("Failed to delete leave request"))?;
        Ok(Success::new((), "Leave request deleted successfully."))
    })
}

/// Returns every leave request.
///
/// # Errors
///
/// Returns `Storage` if the store cannot be read.
pub fn list_leave_requests<S: EntityStore>(store: &mut S) -> Outcome<Vec<LeaveRequest>> {
    let requests = store
        .list_leave_requests()
        .map_err(|e| e.into_failure("Failed to list leave requests"))?;
    Ok(Success::new(
        requests,
        "All leave requests retrieved successfully.",
    ))
}
