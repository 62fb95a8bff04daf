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

mod error;
mod leave_period;
mod status_policy;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use leave_period::{format_iso_date, parse_iso_date, validate_leave_period};
pub use status_policy::{PendingOnlyTransitions, PermissiveTransitions, TransitionPolicy};
pub use types::{DateRange, Department, Employee, LeaveRequest, LeaveStatus, Role, UserAccount};
pub use validation::{validate_department, validate_email, validate_employee_fields};
