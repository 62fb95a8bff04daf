// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Department;

/// Validates the caller-supplied fields of an employee.
///
/// References (department, role, user) are resolved separately.
///
/// # Errors
///
/// - `DomainError::InvalidName` if the name is blank
/// - `DomainError::InvalidEmail` if the email is blank or malformed
pub fn validate_employee_fields(name: &str, email: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    validate_email(email)
}

/// Validates email syntax: `local@domain.tld` without whitespace.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` describing the first violated rule.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() {
        return Err(DomainError::InvalidEmail(String::from(
            "Email cannot be empty",
        )));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' must not contain whitespace"
        )));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' is missing '@'"
        )));
    };

    if local.is_empty() || domain.contains('@') {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' is not a valid address"
        )));
    }

    // Domain needs at least one dot with non-empty labels on both sides
    let labels_ok = domain.split('.').all(|label| !label.is_empty());
    if !domain.contains('.') || !labels_ok {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' has an invalid domain"
        )));
    }

    Ok(())
}

/// Validates a department before it is saved.
///
/// # Errors
///
/// Returns `DomainError::InvalidDepartmentName` if the name is blank.
pub fn validate_department(department: &Department) -> Result<(), DomainError> {
    if department.name.trim().is_empty() {
        return Err(DomainError::InvalidDepartmentName(String::from(
            "Department name cannot be empty",
        )));
    }
    Ok(())
}
