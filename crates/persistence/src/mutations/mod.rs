// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Inserts return the new row ID via `last_insert_rowid()`. Updates and
//! deletes that match no row return `PersistenceError::NotFound`.
//!
//! ## Module Organization
//!
//! - `users` — Login identities, role assignment and role creation
//! - `departments` — Department writes
//! - `employees` — Employee writes
//! - `leave_requests` — Leave request writes

pub mod departments;
pub mod employees;
pub mod leave_requests;
pub mod users;

use crate::error::PersistenceError;

/// Returns the identifier of a referenced entity, or a constraint
/// violation if the reference was never saved.
fn require_id(id: Option<i64>, what: &str) -> Result<i64, PersistenceError> {
    id.ok_or_else(|| PersistenceError::ConstraintViolation(format!("{what} has not been saved")))
}

/// Fails with `NotFound` when a write matched no row.
fn require_affected(affected: usize, what: &str, id: i64) -> Result<(), PersistenceError> {
    if affected == 0 {
        return Err(PersistenceError::NotFound(format!("{what} {id}")));
    }
    Ok(())
}
