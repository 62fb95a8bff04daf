// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod department;
mod employee;
mod error;
mod leave;
mod outcome;
mod store;

#[cfg(test)]
mod tests;

pub use department::{delete_department, get_department, list_departments, save_department};
pub use employee::{
    EmployeeDraft, delete_employee, get_employee, get_role, get_user_by_username,
    list_employees, list_employees_in_department, save_employee,
};
pub use error::{StoreError, translate_domain_error};
pub use leave::{
    LeaveDecision, LeaveSubmission, delete_leave_request, list_leave_requests,
    submit_leave_request, update_leave_request,
};
pub use outcome::{Envelope, ErrorKind, Failure, Outcome, Success};
pub use store::EntityStore;
