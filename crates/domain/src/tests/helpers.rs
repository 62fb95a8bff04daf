// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DateRange, Department, Employee, Role, UserAccount};
use time::macros::date;

pub fn create_test_department() -> Department {
    Department::with_id(1, "Engineering", Some("Builds things"))
}

pub fn create_test_user(user_id: i64, username: &str) -> UserAccount {
    UserAccount {
        user_id,
        username: username.to_string(),
        roles: vec![Role::new(3, "EMPLOYEE")],
    }
}

pub fn create_test_employee(employee_id: i64, email: &str) -> Employee {
    Employee {
        employee_id: Some(employee_id),
        name: String::from("Ada Lovelace"),
        email: email.to_string(),
        department: create_test_department(),
        role: Role::new(10, "Developer"),
        user: create_test_user(employee_id, "ada"),
    }
}

pub fn range(start: time::Date, end: time::Date) -> DateRange {
    DateRange::new(start, end)
}

pub const TODAY: time::Date = date!(2026 - 03 - 10);
