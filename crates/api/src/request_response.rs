// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Field names follow the camelCase JSON contract of the HTTP API. Dates
//! travel as ISO-8601 `YYYY-MM-DD` strings.

use leavedesk_domain::{Department, Employee, LeaveRequest, LeaveStatus, Role, format_iso_date};
use serde::{Deserialize, Serialize};

/// Credentials for registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Credentials for login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
}

/// A department to create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRequest {
    #[serde(default)]
    pub department_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentInfo {
    pub department_id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<Department> for DepartmentInfo {
    fn from(department: Department) -> Self {
        Self {
            department_id: department.department_id.unwrap_or_default(),
            name: department.name,
            description: department.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInfo {
    pub role_id: i64,
    pub name: String,
}

impl From<Role> for RoleInfo {
    fn from(role: Role) -> Self {
        Self {
            role_id: role.role_id,
            name: role.name,
        }
    }
}

/// An employee to create or update.
///
/// The department, business role and login identity are referenced by
/// identifier or username and resolved server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[serde(default)]
    pub employee_id: Option<i64>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInfo {
    pub employee_id: i64,
    pub name: String,
    pub email: String,
    pub department: DepartmentInfo,
    pub role: RoleInfo,
    pub username: String,
}

impl From<Employee> for EmployeeInfo {
    fn from(employee: Employee) -> Self {
        Self {
            employee_id: employee.employee_id.unwrap_or_default(),
            name: employee.name,
            email: employee.email,
            department: DepartmentInfo::from(employee.department),
            role: RoleInfo::from(employee.role),
            username: employee.user.username,
        }
    }
}

/// Query string of a leave submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLeaveQuery {
    pub employee_id: i64,
}

/// Body of a leave submission. A supplied `status` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLeaveRequest {
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of a leave review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveDecisionRequest {
    pub status: String,
    #[serde(default)]
    pub manager_comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestInfo {
    pub id: i64,
    pub employee: EmployeeInfo,
    pub start_date: String,
    pub end_date: String,
    pub status: LeaveStatus,
    pub reason: String,
    pub manager_comment: Option<String>,
}

impl From<LeaveRequest> for LeaveRequestInfo {
    fn from(request: LeaveRequest) -> Self {
        // Dates read back from the store always format
        let format = |date| format_iso_date(date).unwrap_or_else(|_| date.to_string());
        Self {
            id: request.leave_request_id.unwrap_or_default(),
            employee: EmployeeInfo::from(request.employee),
            start_date: format(request.period.start()),
            end_date: format(request.period.end()),
            status: request.status,
            reason: request.reason,
            manager_comment: request.manager_comment,
        }
    }
}
