// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Leavedesk backend.
//!
//! This crate owns the wire contract (DTOs with string dates and camelCase
//! fields), password login with bcrypt, JWT bearer tokens, the declarative
//! access policy and the operations that bridge DTOs to the core.

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
#![allow(clippy::multiple_crate_versions)]

mod access_policy;
mod auth;
mod error;
mod handlers;
mod password_policy;
mod request_response;
mod token;

#[cfg(test)]
mod tests;

pub use access_policy::{Access, AccessDecision, AccessPolicy};
pub use auth::{AuthRole, AuthenticatedActor, AuthenticationService};
pub use error::{ApiError, AuthError};
pub use handlers::{
    REGISTERED_MESSAGE, create_department, create_employee, delete_department, delete_employee,
    delete_leave_request, get_department, get_employee, list_departments, list_employees,
    list_employees_in_department, list_leave_requests, login, register, submit_leave_request,
    update_department, update_employee, update_leave_request,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    DepartmentInfo, DepartmentRequest, EmployeeInfo, EmployeeRequest, LeaveDecisionRequest,
    LeaveRequestInfo, LoginRequest, LoginResponse, RegisterRequest, RoleInfo, SubmitLeaveQuery,
    SubmitLeaveRequest,
};
pub use token::{Claims, MIN_SECRET_LEN, TokenConfig, TokenError, TokenService};
