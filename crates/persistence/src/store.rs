// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! [`EntityStore`] implementation.

use leavedesk::{EntityStore, Outcome, StoreError};
use leavedesk_domain::{DateRange, Department, Employee, LeaveRequest, Role, UserAccount};
use tracing::error;

use crate::Persistence;
use crate::backend::sqlite;
use crate::{mutations, queries};

fn vanished(what: &str, id: i64) -> StoreError {
    StoreError::Backend(format!("{what} {id} could not be reloaded after saving"))
}

impl EntityStore for Persistence {
    fn find_employee(&mut self, employee_id: i64) -> Result<Option<Employee>, StoreError> {
        Ok(queries::employees::get_employee(&mut self.conn, employee_id)?)
    }

    fn list_employees(&mut self) -> Result<Vec<Employee>, StoreError> {
        Ok(queries::employees::list_employees(&mut self.conn)?)
    }

    fn list_employees_in_department(
        &mut self,
        department_id: i64,
    ) -> Result<Vec<Employee>, StoreError> {
        Ok(queries::employees::list_employees_in_department(
            &mut self.conn,
            department_id,
        )?)
    }

    fn save_employee(&mut self, employee: &Employee) -> Result<Employee, StoreError> {
        let employee_id: i64 = match employee.employee_id {
            Some(employee_id) => {
                mutations::employees::update_employee(&mut self.conn, employee_id, employee)?;
                employee_id
            }
            None => mutations::employees::insert_employee(&mut self.conn, employee)?,
        };

        queries::employees::get_employee(&mut self.conn, employee_id)?
            .ok_or_else(|| vanished("Employee", employee_id))
    }

    fn delete_employee(&mut self, employee_id: i64) -> Result<(), StoreError> {
        Ok(mutations::employees::delete_employee(
            &mut self.conn,
            employee_id,
        )?)
    }

    fn find_department(&mut self, department_id: i64) -> Result<Option<Department>, StoreError> {
        Ok(queries::departments::get_department(
            &mut self.conn,
            department_id,
        )?)
    }

    fn list_departments(&mut self) -> Result<Vec<Department>, StoreError> {
        Ok(queries::departments::list_departments(&mut self.conn)?)
    }

    fn save_department(&mut self, department: &Department) -> Result<Department, StoreError> {
        let department_id: i64 = match department.department_id {
            Some(department_id) => {
                mutations::departments::update_department(
                    &mut self.conn,
                    department_id,
                    department,
                )?;
                department_id
            }
            None => mutations::departments::insert_department(&mut self.conn, department)?,
        };

        queries::departments::get_department(&mut self.conn, department_id)?
            .ok_or_else(|| vanished("Department", department_id))
    }

    fn delete_department(&mut self, department_id: i64) -> Result<(), StoreError> {
        Ok(mutations::departments::delete_department(
            &mut self.conn,
            department_id,
        )?)
    }

    fn find_role(&mut self, role_id: i64) -> Result<Option<Role>, StoreError> {
        Ok(queries::users::get_role_by_id(&mut self.conn, role_id)?)
    }

    fn find_user_by_username(&mut self, username: &str) -> Result<Option<UserAccount>, StoreError> {
        Ok(queries::users::get_user_account_by_username(
            &mut self.conn,
            username,
        )?)
    }

    fn find_leave_request(
        &mut self,
        leave_request_id: i64,
    ) -> Result<Option<LeaveRequest>, StoreError> {
        Ok(queries::leave_requests::get_leave_request(
            &mut self.conn,
            leave_request_id,
        )?)
    }

    fn list_leave_requests(&mut self) -> Result<Vec<LeaveRequest>, StoreError> {
        Ok(queries::leave_requests::list_leave_requests(
            &mut self.conn,
        )?)
    }

    fn count_leave_requests_for_employee(
        &mut self,
        employee_id: i64,
    ) -> Result<usize, StoreError> {
        Ok(queries::leave_requests::count_leave_requests_for_employee(
            &mut self.conn,
            employee_id,
        )?)
    }

    fn find_overlapping_approved(
        &mut self,
        employee_id: i64,
        period: DateRange,
    ) -> Result<Vec<LeaveRequest>, StoreError> {
        Ok(queries::leave_requests::find_overlapping_approved(
            &mut self.conn,
            employee_id,
            period,
        )?)
    }

    fn save_leave_request(&mut self, request: &LeaveRequest) -> Result<LeaveRequest, StoreError> {
        let leave_request_id: i64 = match request.leave_request_id {
            Some(leave_request_id) => {
                mutations::leave_requests::update_leave_request(
                    &mut self.conn,
                    leave_request_id,
                    request,
                )?;
                leave_request_id
            }
            None => mutations::leave_requests::insert_leave_request(&mut self.conn, request)?,
        };

        queries::leave_requests::get_leave_request(&mut self.conn, leave_request_id)?
            .ok_or_else(|| vanished("Leave request", leave_request_id))
    }

    fn delete_leave_request(&mut self, leave_request_id: i64) -> Result<(), StoreError> {
        Ok(mutations::leave_requests::delete_leave_request(
            &mut self.conn,
            leave_request_id,
        )?)
    }

    /// Runs `op` inside a `BEGIN IMMEDIATE` transaction.
    ///
    /// The transaction commits when `op` succeeds and rolls back when it
    /// fails.
    fn exclusive<T, F>(&mut self, op: F) -> Outcome<T>
    where
        F: FnOnce(&mut Self) -> Outcome<T>,
    {
        if let Err(e) = sqlite::begin_immediate(&mut self.conn) {
            error!(error = %e, "Failed to open write transaction");
            return Err(StoreError::from(e).into_failure("Failed to start transaction"));
        }

        match op(self) {
            Ok(success) => match sqlite::commit(&mut self.conn) {
                Ok(()) => Ok(success),
                Err(e) => {
                    error!(error = %e, "Failed to commit transaction");
                    Err(StoreError::from(e).into_failure("Failed to commit transaction"))
                }
            },
            Err(failure) => {
                if let Err(e) = sqlite::rollback(&mut self.conn) {
                    error!(error = %e, "Failed to roll back transaction");
                }
                Err(failure)
            }
        }
    }
}
