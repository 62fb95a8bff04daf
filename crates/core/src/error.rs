// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::outcome::{ErrorKind, Failure};
use leavedesk_domain::DomainError;

/// Errors reported by an [`EntityStore`](crate::EntityStore) implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness or referential constraint rejected the write.
    Constraint(String),
    /// Any other storage failure (I/O, connection, corrupt row).
    Backend(String),
}

impl StoreError {
    /// Converts the error into a failure carrying the given summary.
    ///
    /// Constraint violations become conflicts; everything else is a
    /// storage failure.
    #[must_use]
    pub fn into_failure(self, message: &str) -> Failure {
        match self {
            Self::Constraint(detail) => Failure::new(ErrorKind::Conflict, message, detail),
            Self::Backend(detail) => Failure::new(ErrorKind::Storage, message, detail),
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constraint(msg) => write!(f, "Constraint violation: {msg}"),
            Self::Backend(msg) => write!(f, "Storage backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StoreError> for Failure {
    fn from(err: StoreError) -> Self {
        err.into_failure("Storage operation failed")
    }
}

/// Translates a domain error into a failure.
///
/// This is the only place where domain rule violations acquire a
/// caller-facing summary and error kind.
#[must_use]
pub fn translate_domain_error(err: &DomainError) -> Failure {
    let detail: String = err.to_string();
    match err {
        DomainError::StartDateInPast { .. } => Failure::invalid_input("Invalid dates", detail),
        DomainError::EndBeforeStart { .. } => {
            Failure::invalid_input("Invalid date range", detail)
        }
        DomainError::InvalidName(_) | DomainError::InvalidEmail(_) => {
            Failure::invalid_input("Invalid employee", detail)
        }
        DomainError::InvalidDepartmentName(_) => {
            Failure::invalid_input("Invalid department", detail)
        }
        DomainError::InvalidLeaveStatus { .. } => {
            Failure::invalid_input("Invalid leave status", detail)
        }
        DomainError::IllegalStatusTransition { .. } => {
            Failure::conflict("Illegal status transition", detail)
        }
        DomainError::DateParseError { .. } => Failure::invalid_input("Invalid date", detail),
    }
}
