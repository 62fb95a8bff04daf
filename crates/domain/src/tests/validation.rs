// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Department, DomainError, validate_department, validate_email, validate_employee_fields};

#[test]
fn test_validate_employee_fields_accepts_valid_employee() {
    assert!(validate_employee_fields("Ada Lovelace", "ada@example.com").is_ok());
}

#[test]
fn test_validate_employee_fields_rejects_blank_name() {
    let result = validate_employee_fields("   ", "ada@example.com");
    assert!(matches!(result, Err(DomainError::InvalidName(_))));
}

#[test]
fn test_name_checked_before_email() {
    let result = validate_employee_fields("", "not-an-email");
    assert!(matches!(result, Err(DomainError::InvalidName(_))));
}

#[test]
fn test_validate_email_accepts_common_forms() {
    for email in [
        "ada@example.com",
        "first.last+tag@mail.example.co.uk",
        "x@y.z",
    ] {
        assert!(validate_email(email).is_ok(), "{email} should be valid");
    }
}

#[test]
fn test_validate_email_rejects_malformed() {
    for email in [
        "",
        "ada",
        "@example.com",
        "ada@",
        "ada@example",
        "ada@@example.com",
        "ada@example..com",
        "ada@.com",
        "ada lovelace@example.com",
    ] {
        assert!(
            matches!(validate_email(email), Err(DomainError::InvalidEmail(_))),
            "{email:?} should be rejected"
        );
    }
}

#[test]
fn test_validate_department_requires_name() {
    assert!(validate_department(&Department::new("Engineering", None)).is_ok());

    let result = validate_department(&Department::new(" ", Some("blank")));
    assert!(matches!(result, Err(DomainError::InvalidDepartmentName(_))));
}
