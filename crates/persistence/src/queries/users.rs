// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Login identity and role queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::UserCredentials;
use crate::diesel_schema::{roles, user_roles, users};
use crate::error::PersistenceError;
use leavedesk_domain::{Role, UserAccount};

/// Diesel Queryable struct for role rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = roles)]
pub struct RoleRow {
    pub role_id: i64,
    pub name: String,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            role_id: row.role_id,
            name: row.name,
        }
    }
}

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
struct UserRow {
    user_id: i64,
    username: String,
    password_hash: String,
    created_at: String,
}

/// Retrieves a role by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_role_by_id(
    conn: &mut SqliteConnection,
    role_id: i64,
) -> Result<Option<Role>, PersistenceError> {
    debug!(role_id, "Looking up role");

    let result: Result<RoleRow, diesel::result::Error> = roles::table
        .filter(roles::role_id.eq(role_id))
        .select(RoleRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a role by its exact name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_role_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<Role>, PersistenceError> {
    debug!("Looking up role by name: {}", name);

    let result: Result<RoleRow, diesel::result::Error> = roles::table
        .filter(roles::name.eq(name))
        .select(RoleRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all roles ordered by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_roles(conn: &mut SqliteConnection) -> Result<Vec<Role>, PersistenceError> {
    let rows: Vec<RoleRow> = roles::table
        .order(roles::role_id.asc())
        .select(RoleRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Role::from).collect())
}

/// Lists the authorization roles assigned to a user, ordered by role ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_roles_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<Role>, PersistenceError> {
    let rows: Vec<RoleRow> = user_roles::table
        .inner_join(roles::table)
        .filter(user_roles::user_id.eq(user_id))
        .order(roles::role_id.asc())
        .select(RoleRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Role::from).collect())
}

/// Retrieves a login identity and its roles by username.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_user_account_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<UserAccount>, PersistenceError> {
    debug!("Looking up user by username: {}", username);

    let result: Result<(i64, String), diesel::result::Error> = users::table
        .filter(users::username.eq(username))
        .select((users::user_id, users::username))
        .first(conn);

    match result {
        Ok((user_id, username)) => {
            let roles: Vec<Role> = get_roles_for_user(conn, user_id)?;
            Ok(Some(UserAccount {
                user_id,
                username,
                roles,
            }))
        }
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves stored credentials by username.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_credentials_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<UserCredentials>, PersistenceError> {
    debug!("Looking up credentials for username: {}", username);

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::username.eq(username))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(UserCredentials {
            user_id: row.user_id,
            username: row.username,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Checks whether a username is already registered.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn username_exists(conn: &mut SqliteConnection, username: &str) -> Result<bool, PersistenceError> {
    let count: i64 = users::table
        .filter(users::username.eq(username))
        .count()
        .get_result(conn)?;

    Ok(count > 0)
}
