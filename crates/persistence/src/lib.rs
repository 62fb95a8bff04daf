// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Leavedesk backend.
//!
//! This crate stores departments, employees, leave requests and login
//! identities in `SQLite` through Diesel, and implements the
//! [`EntityStore`](leavedesk::EntityStore) port used by the core
//! operations.
//!
//! ## Schema
//!
//! Migrations are embedded in the binary and applied on startup. Roles
//! `ADMIN`, `MANAGER` and `EMPLOYEE` are seeded by the initial migration.
//! Dates are stored as `YYYY-MM-DD` text.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` returns a fresh, isolated database per
//! call, so tests never share state.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use leavedesk_domain::Role;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use data_models::UserCredentials;
pub use error::PersistenceError;

/// `SQLite` persistence adapter.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database, ensuring
    /// deterministic test isolation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Login identities
    // ========================================================================

    /// Creates a login identity holding the named roles.
    ///
    /// # Arguments
    ///
    /// * `username` - Unique login name
    /// * `password_hash` - Already-hashed password
    /// * `role_names` - Names of existing roles to assign
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConstraintViolation` if the username is
    /// taken and `PersistenceError::NotFound` if a role does not exist.
    pub fn create_user(
        &mut self,
        username: &str,
        password_hash: &str,
        role_names: &[&str],
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, username, password_hash, role_names)
    }

    /// Retrieves stored credentials by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_credentials_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserCredentials>, PersistenceError> {
        queries::users::get_credentials_by_username(&mut self.conn, username)
    }

    /// Checks whether a username is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn username_exists(&mut self, username: &str) -> Result<bool, PersistenceError> {
        queries::users::username_exists(&mut self.conn, username)
    }

    /// Grants an existing role to an existing user.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment already exists or either side is
    /// missing.
    pub fn assign_role(&mut self, user_id: i64, role_id: i64) -> Result<(), PersistenceError> {
        mutations::users::assign_role(&mut self.conn, user_id, role_id)
    }

    // ========================================================================
    // Roles
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_role_by_name(&mut self, name: &str) -> Result<Option<Role>, PersistenceError> {
        queries::users::get_role_by_name(&mut self.conn, name)
    }

    /// Creates a role, typically a business role such as "Developer".
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConstraintViolation` if the name is taken.
    pub fn create_role(&mut self, name: &str) -> Result<Role, PersistenceError> {
        let role_id: i64 = mutations::users::create_role(&mut self.conn, name)?;
        Ok(Role::new(role_id, name))
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_roles(&mut self) -> Result<Vec<Role>, PersistenceError> {
        queries::users::list_roles(&mut self.conn)
    }
}
