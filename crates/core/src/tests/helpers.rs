// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{EntityStore, LeaveSubmission, Outcome, StoreError};
use leavedesk_domain::{
    DateRange, Department, Employee, LeaveRequest, LeaveStatus, Role, UserAccount,
};
use std::collections::BTreeMap;
use time::macros::date;
use time::{Date, Duration};

pub const TODAY: Date = date!(2026 - 03 - 10);

pub fn days(offset: i64) -> Date {
    TODAY + Duration::days(offset)
}

pub fn submission(start: Date, end: Date, reason: &str) -> LeaveSubmission {
    LeaveSubmission {
        start_date: start,
        end_date: end,
        reason: reason.to_string(),
        status: None,
    }
}

/// An in-memory store that records how often it was written to.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub departments: BTreeMap<i64, Department>,
    pub roles: BTreeMap<i64, Role>,
    pub users: Vec<UserAccount>,
    pub employees: BTreeMap<i64, Employee>,
    pub leave_requests: BTreeMap<i64, LeaveRequest>,
    next_id: i64,
    pub writes: usize,
    pub deletes: usize,
    pub exclusive_calls: usize,
    /// Returned by the next save instead of writing.
    pub fail_next_write: Option<StoreError>,
}

impl MemoryStore {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn take_write_failure(&mut self) -> Result<(), StoreError> {
        match self.fail_next_write.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn insert_approved(&mut self, employee_id: i64, start: Date, end: Date) -> i64 {
        let id = self.allocate_id();
        let mut request = LeaveRequest::new(
            self.employees[&employee_id].clone(),
            DateRange::new(start, end),
            "Approved earlier",
        );
        request.leave_request_id = Some(id);
        request.status = LeaveStatus::Approved;
        self.leave_requests.insert(id, request);
        id
    }
}

impl EntityStore for MemoryStore {
    fn find_employee(&mut self, employee_id: i64) -> Result<Option<Employee>, StoreError> {
        Ok(self.employees.get(&employee_id).cloned())
    }

    fn list_employees(&mut self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.employees.values().cloned().collect())
    }

    fn list_employees_in_department(
        &mut self,
        department_id: i64,
    ) -> Result<Vec<Employee>, StoreError> {
        Ok(self
            .employees
            .values()
            .filter(|e| e.department.department_id == Some(department_id))
            .cloned()
            .collect())
    }

    fn save_employee(&mut self, employee: &Employee) -> Result<Employee, StoreError> {
        self.take_write_failure()?;
        if self
            .employees
            .values()
            .any(|e| e.email == employee.email && e.employee_id != employee.employee_id)
        {
            return Err(StoreError::Constraint(String::from(
                "UNIQUE constraint failed: employees.email",
            )));
        }
        let mut saved = employee.clone();
        let id = match employee.employee_id {
            Some(id) => id,
            None => self.allocate_id(),
        };
        saved.employee_id = Some(id);
        self.employees.insert(id, saved.clone());
        self.writes += 1;
        Ok(saved)
    }

    fn delete_employee(&mut self, employee_id: i64) -> Result<(), StoreError> {
        self.employees.remove(&employee_id);
        self.deletes += 1;
        Ok(())
    }

    fn find_department(&mut self, department_id: i64) -> Result<Option<Department>, StoreError> {
        Ok(self.departments.get(&department_id).cloned())
    }

    fn list_departments(&mut self) -> Result<Vec<Department>, StoreError> {
        Ok(self.departments.values().cloned().collect())
    }

    fn save_department(&mut self, department: &Department) -> Result<Department, StoreError> {
        self.take_write_failure()?;
        if self
            .departments
            .values()
            .any(|d| d.name == department.name && d.department_id != department.department_id)
        {
            return Err(StoreError::Constraint(String::from(
                "UNIQUE constraint failed: departments.name",
            )));
        }
        let mut saved = department.clone();
        let id = match department.department_id {
            Some(id) => id,
            None => self.allocate_id(),
        };
        saved.department_id = Some(id);
        self.departments.insert(id, saved.clone());
        self.writes += 1;
        Ok(saved)
    }

    fn delete_department(&mut self, department_id: i64) -> Result<(), StoreError> {
        self.departments.remove(&department_id);
        self.deletes += 1;
        Ok(())
    }

    fn find_role(&mut self, role_id: i64) -> Result<Option<Role>, StoreError> {
        Ok(self.roles.get(&role_id).cloned())
    }

    fn find_user_by_username(&mut self, username: &str) -> Result<Option<UserAccount>, StoreError> {
        Ok(self.users.iter().find(|u| u.username == username).cloned())
    }

    fn find_leave_request(
        &mut self,
        leave_request_id: i64,
    ) -> Result<Option<LeaveRequest>, StoreError> {
        Ok(self.leave_requests.get(&leave_request_id).cloned())
    }

    fn list_leave_requests(&mut self) -> Result<Vec<LeaveRequest>, StoreError> {
        Ok(self.leave_requests.values().cloned().collect())
    }

    fn count_leave_requests_for_employee(
        &mut self,
        employee_id: i64,
    ) -> Result<usize, StoreError> {
        Ok(self
            .leave_requests
            .values()
            .filter(|r| r.employee.employee_id == Some(employee_id))
            .count())
    }

    fn find_overlapping_approved(
        &mut self,
        employee_id: i64,
        period: DateRange,
    ) -> Result<Vec<LeaveRequest>, StoreError> {
        Ok(self
            .leave_requests
            .values()
            .filter(|r| {
                r.employee.employee_id == Some(employee_id)
                    && r.status == LeaveStatus::Approved
                    && r.period.overlaps(&period)
            })
            .cloned()
            .collect())
    }

    fn save_leave_request(&mut self, request: &LeaveRequest) -> Result<LeaveRequest, StoreError> {
        self.take_write_failure()?;
        let mut saved = request.clone();
        let id = match request.leave_request_id {
            Some(id) => id,
            None => self.allocate_id(),
        };
        saved.leave_request_id = Some(id);
        self.leave_requests.insert(id, saved.clone());
        self.writes += 1;
        Ok(saved)
    }

    fn delete_leave_request(&mut self, leave_request_id: i64) -> Result<(), StoreError> {
        self.leave_requests.remove(&leave_request_id);
        self.deletes += 1;
        Ok(())
    }

    fn exclusive<T, F>(&mut self, op: F) -> Outcome<T>
    where
        F: FnOnce(&mut Self) -> Outcome<T>,
    {
        self.exclusive_calls += 1;
        op(self)
    }
}

fn user(user_id: i64, username: &str) -> UserAccount {
    UserAccount {
        user_id,
        username: username.to_string(),
        roles: vec![Role::new(3, "EMPLOYEE")],
    }
}

fn employee(employee_id: i64, name: &str, email: &str, user: UserAccount) -> Employee {
    Employee {
        employee_id: Some(employee_id),
        name: name.to_string(),
        email: email.to_string(),
        department: Department::with_id(1, "Engineering", None),
        role: Role::new(10, "Developer"),
        user,
    }
}

/// Two departments, the seeded roles, three login identities and two
/// employees in "Engineering". "Finance" is empty; "carol" has no employee.
pub fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore {
        next_id: 100,
        ..MemoryStore::default()
    };

    store
        .departments
        .insert(1, Department::with_id(1, "Engineering", None));
    store
        .departments
        .insert(2, Department::with_id(2, "Finance", Some("Money")));

    for role in [
        Role::new(1, "ADMIN"),
        Role::new(2, "MANAGER"),
        Role::new(3, "EMPLOYEE"),
        Role::new(10, "Developer"),
    ] {
        store.roles.insert(role.role_id, role);
    }

    let ada = user(1, "ada");
    let grace = user(2, "grace");
    store.users = vec![ada.clone(), grace.clone(), user(3, "carol")];

    store
        .employees
        .insert(1, employee(1, "Ada Lovelace", "ada@example.com", ada));
    store
        .employees
        .insert(2, employee(2, "Grace Hopper", "grace@example.com", grace));

    store
}
