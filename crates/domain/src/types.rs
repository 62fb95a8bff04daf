// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// An organizational unit that employees belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    /// The store-assigned identifier.
    /// `None` indicates the department has not been persisted yet.
    pub department_id: Option<i64>,
    /// The unique department name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
}

impl Department {
    /// Creates a new, unsaved `Department`.
    #[must_use]
    pub fn new(name: &str, description: Option<&str>) -> Self {
        Self {
            department_id: None,
            name: name.to_string(),
            description: description.map(str::to_string),
        }
    }

    /// Creates a `Department` with an existing identifier.
    #[must_use]
    pub fn with_id(department_id: i64, name: &str, description: Option<&str>) -> Self {
        Self {
            department_id: Some(department_id),
            name: name.to_string(),
            description: description.map(str::to_string),
        }
    }
}

/// A named role.
///
/// The same table backs the employee's business role and the
/// authorization roles assigned to login identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Role {
    pub role_id: i64,
    pub name: String,
}

impl Role {
    #[must_use]
    pub fn new(role_id: i64, name: &str) -> Self {
        Self {
            role_id,
            name: name.to_string(),
        }
    }
}

/// A login identity as seen by the rest of the system.
///
/// Password material never leaves the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub user_id: i64,
    pub username: String,
    /// Authorization roles assigned to this identity.
    pub roles: Vec<Role>,
}

/// An employee with its department, business role and login identity resolved.
#[derive(Debug, Clone)]
pub struct Employee {
    /// `None` until the employee has been persisted.
    pub employee_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub department: Department,
    /// The business role (e.g. "Developer").
    pub role: Role,
    pub user: UserAccount,
}

// Two employees are the same entity when identifier and email match,
// regardless of their other, mutable fields.
impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.employee_id == other.employee_id && self.email == other.email
    }
}

impl Eq for Employee {}

impl std::hash::Hash for Employee {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.employee_id.hash(state);
        self.email.hash(state);
    }
}

/// Review state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    /// Submitted, awaiting review.
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl FromStr for LeaveStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidLeaveStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An inclusive range of calendar days.
///
/// Construction does not check ordering; see
/// [`validate_leave_period`](crate::validate_leave_period).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns true if the two ranges share at least one calendar day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

/// A request for leave over a range of days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveRequest {
    /// `None` until the request has been persisted.
    pub leave_request_id: Option<i64>,
    pub employee: Employee,
    pub period: DateRange,
    pub status: LeaveStatus,
    pub reason: String,
    /// Set by the reviewer.
    pub manager_comment: Option<String>,
}

impl LeaveRequest {
    /// Creates a new, unsaved request in the `PENDING` state.
    #[must_use]
    pub fn new(employee: Employee, period: DateRange, reason: &str) -> Self {
        Self {
            leave_request_id: None,
            employee,
            period,
            status: LeaveStatus::Pending,
            reason: reason.to_string(),
            manager_comment: None,
        }
    }
}
