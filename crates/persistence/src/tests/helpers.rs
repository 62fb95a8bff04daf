// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use leavedesk::EntityStore;
use leavedesk_domain::{DateRange, Department, Employee, LeaveRequest, LeaveStatus, Role};
use time::Date;

/// A throwaway hash; nothing in these tests verifies passwords.
pub const TEST_HASH: &str = "$2b$04$abcdefghijklmnopqrstuuJ0n1s0Zq3y2x0d7dYhA6cQeCkq8P7a";

pub struct Fixture {
    pub store: Persistence,
    pub engineering: Department,
    pub finance: Department,
    pub developer: Role,
    pub ada: Employee,
    pub grace: Employee,
}

/// A database with two departments, a "Developer" business role and two
/// employees in "Engineering". "Finance" is empty.
pub fn fixture() -> Fixture {
    let mut store = Persistence::new_in_memory().unwrap();

    let engineering = store
        .save_department(&Department::new("Engineering", None))
        .unwrap();
    let finance = store
        .save_department(&Department::new("Finance", Some("Money")))
        .unwrap();
    let developer = store.create_role("Developer").unwrap();

    store.create_user("ada", TEST_HASH, &["EMPLOYEE"]).unwrap();
    store
        .create_user("grace", TEST_HASH, &["EMPLOYEE", "MANAGER"])
        .unwrap();

    let ada = new_employee(&mut store, "Ada Lovelace", "ada@example.com", &engineering, &developer, "ada");
    let grace = new_employee(
        &mut store,
        "Grace Hopper",
        "grace@example.com",
        &engineering,
        &developer,
        "grace",
    );

    Fixture {
        store,
        engineering,
        finance,
        developer,
        ada,
        grace,
    }
}

pub fn new_employee(
    store: &mut Persistence,
    name: &str,
    email: &str,
    department: &Department,
    role: &Role,
    username: &str,
) -> Employee {
    let user = store.find_user_by_username(username).unwrap().unwrap();
    store
        .save_employee(&Employee {
            employee_id: None,
            name: name.to_string(),
            email: email.to_string(),
            department: department.clone(),
            role: role.clone(),
            user,
        })
        .unwrap()
}

pub fn save_request(
    store: &mut Persistence,
    employee: &Employee,
    start: Date,
    end: Date,
    status: LeaveStatus,
) -> LeaveRequest {
    let mut request = LeaveRequest::new(employee.clone(), DateRange::new(start, end), "Holiday");
    request.status = status;
    store.save_leave_request(&request).unwrap()
}
