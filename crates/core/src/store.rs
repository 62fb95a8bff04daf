// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The storage port consumed by the core operations.

use crate::error::StoreError;
use crate::outcome::Outcome;
use leavedesk_domain::{DateRange, Department, Employee, LeaveRequest, Role, UserAccount};

/// Record access required by the core operations.
///
/// Lookups by identifier return `Ok(None)` when nothing matches. Saves
/// insert when the entity carries no identifier and update otherwise,
/// returning the stored record with its references resolved.
pub trait EntityStore {
    /// # Errors
    /// Returns an error if the store cannot be read.
    fn find_employee(&mut self, employee_id: i64) -> Result<Option<Employee>, StoreError>;

    /// # Errors
    /// Returns an error if the store cannot be read.
    fn list_employees(&mut self) -> Result<Vec<Employee>, StoreError>;

    /// # Errors
    /// Returns an error if the store cannot be read.
    fn list_employees_in_department(
        &mut self,
        department_id: i64,
    ) -> Result<Vec<Employee>, StoreError>;

    /// # Errors
    /// Returns `StoreError::Constraint` if the email is already taken or a
    /// reference is dangling.
    fn save_employee(&mut self, employee: &Employee) -> Result<Employee, StoreError>;

    /// # Errors
    /// Returns an error if the delete fails.
    fn delete_employee(&mut self, employee_id: i64) -> Result<(), StoreError>;

    /// # Errors
    /// Returns an error if the store cannot be read.
    fn find_department(&mut self, department_id: i64) -> Result<Option<Department>, StoreError>;

    /// # Errors
    /// Returns an error if the store cannot be read.
    fn list_departments(&mut self) -> Result<Vec<Department>, StoreError>;

    /// # Errors
    /// Returns `StoreError::Constraint` if the name is already taken.
    fn save_department(&mut self, department: &Department) -> Result<Department, StoreError>;

    /// # Errors
    /// Returns an error if the delete fails.
    fn delete_department(&mut self, department_id: i64) -> Result<(), StoreError>;

    /// # Errors
    /// Returns an error if the store cannot be read.
    fn find_role(&mut self, role_id: i64) -> Result<Option<Role>, StoreError>;

    /// # Errors
    /// Returns an error if the store cannot be read.
    fn find_user_by_username(&mut self, username: &str) -> Result<Option<UserAccount>, StoreError>;

    /// # Errors
    /// Returns an error if the store cannot be read.
    fn find_leave_request(
        &mut self,
        leave_request_id: i64,
    ) -> Result<Option<LeaveRequest>, StoreError>;

    /// # Errors
    /// Returns an error if the store cannot be read.
    fn list_leave_requests(&mut self) -> Result<Vec<LeaveRequest>, StoreError>;

    /// Counts leave requests of every status owned by an employee.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    fn count_leave_requests_for_employee(&mut self, employee_id: i64)
    -> Result<usize, StoreError>;

    /// Returns the employee's `APPROVED` requests sharing at least one day
    /// with `period`.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    fn find_overlapping_approved(
        &mut self,
        employee_id: i64,
        period: DateRange,
    ) -> Result<Vec<LeaveRequest>, StoreError>;

    /// # Errors
    /// Returns an error if the write fails.
    fn save_leave_request(&mut self, request: &LeaveRequest) -> Result<LeaveRequest, StoreError>;

    /// # Errors
    /// Returns an error if the delete fails.
    fn delete_leave_request(&mut self, leave_request_id: i64) -> Result<(), StoreError>;

    /// Runs a check-then-act sequence without interleaving writes from
    /// other callers.
    ///
    /// Stores that support transactions commit when `op` succeeds and roll
    /// back when it fails. The default runs `op` directly.
    ///
    /// # Errors
    /// Returns the failure produced by `op`, or a storage failure if the
    /// store cannot provide isolation.
    fn exclusive<T, F>(&mut self, op: F) -> Outcome<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Outcome<T>,
    {
        op(self)
    }
}
