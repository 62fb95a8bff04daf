// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Login identity and role mutations.
//!
//! Passwords arrive here already hashed; hashing belongs to the
//! authentication layer.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{roles, user_roles, users};
use crate::error::PersistenceError;
use crate::queries::users::get_role_by_name;

/// Creates a login identity and assigns it the named roles.
///
/// The user row and its role assignments are written in one transaction.
///
/// # Errors
///
/// Returns `PersistenceError::ConstraintViolation` if the username is taken
/// and `PersistenceError::NotFound` if a role name does not exist.
pub fn create_user(
    conn: &mut SqliteConnection,
    username: &str,
    password_hash: &str,
    role_names: &[&str],
) -> Result<i64, PersistenceError> {
    conn.transaction::<i64, PersistenceError, _>(|conn| {
        diesel::insert_into(users::table)
            .values((
                users::username.eq(username),
                users::password_hash.eq(password_hash),
            ))
            .execute(conn)?;

        let user_id: i64 = get_last_insert_rowid(conn)?;

        for role_name in role_names {
            let role = get_role_by_name(conn, role_name)?
                .ok_or_else(|| PersistenceError::NotFound(format!("Role {role_name}")))?;
            assign_role(conn, user_id, role.role_id)?;
        }

        info!(user_id, username, roles = ?role_names, "User created");
        Ok(user_id)
    })
}

/// Grants a role to a user.
///
/// # Errors
///
/// Returns `PersistenceError::ConstraintViolation` if the user already
/// holds the role or either side does not exist.
pub fn assign_role(
    conn: &mut SqliteConnection,
    user_id: i64,
    role_id: i64,
) -> Result<(), PersistenceError> {
    diesel::insert_into(user_roles::table)
        .values((user_roles::user_id.eq(user_id), user_roles::role_id.eq(role_id)))
        .execute(conn)?;

    info!(user_id, role_id, "Role assigned");
    Ok(())
}

/// Creates a role and returns its new ID.
///
/// # Errors
///
/// Returns `PersistenceError::ConstraintViolation` if the name is taken.
pub fn create_role(conn: &mut SqliteConnection, name: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(roles::table)
        .values(roles::name.eq(name))
        .execute(conn)?;

    let role_id: i64 = get_last_insert_rowid(conn)?;
    info!(role_id, name, "Role created");
    Ok(role_id)
}
