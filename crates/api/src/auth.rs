// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication types and services.

use leavedesk::EntityStore;
use leavedesk_domain::UserAccount;
use leavedesk_persistence::{Persistence, PersistenceError, UserCredentials};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::error::{ApiError, AuthError};
use crate::password_policy::PasswordPolicy;
use crate::token::TokenService;

/// Authorization roles.
///
/// These are distinct from an employee's business role such as
/// "Developer"; only these three take part in access decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthRole {
    Admin,
    Manager,
    Employee,
}

impl AuthRole {
    /// The role name as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Employee => "EMPLOYEE",
        }
    }

    /// Maps a stored role name; business role names yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ADMIN" => Some(Self::Admin),
            "MANAGER" => Some(Self::Manager),
            "EMPLOYEE" => Some(Self::Employee),
            _ => None,
        }
    }
}

impl std::fmt::Display for AuthRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A caller whose token has been validated, with the roles currently
/// stored for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    pub username: String,
    pub roles: Vec<AuthRole>,
}

impl AuthenticatedActor {
    #[must_use]
    pub const fn new(username: String, roles: Vec<AuthRole>) -> Self {
        Self { username, roles }
    }

    #[must_use]
    pub fn has_role(&self, role: AuthRole) -> bool {
        self.roles.contains(&role)
    }

    /// True when the actor holds at least one of `roles`.
    #[must_use]
    pub fn has_any_role(&self, roles: &[AuthRole]) -> bool {
        roles.iter().any(|role| self.has_role(*role))
    }
}

impl From<&UserAccount> for AuthenticatedActor {
    fn from(account: &UserAccount) -> Self {
        Self {
            username: account.username.clone(),
            roles: account
                .roles
                .iter()
                .filter_map(|role| AuthRole::from_name(&role.name))
                .collect(),
        }
    }
}

/// Authentication service for password login and bearer tokens.
pub struct AuthenticationService;

impl AuthenticationService {
    const INVALID_CREDENTIALS: &'static str = "Invalid username or password";

    /// Registers a self-service login identity holding the `EMPLOYEE` role.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The username is blank or already registered
    /// - The password violates the password policy
    /// - Hashing or the database write fails
    pub fn register(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
        bcrypt_cost: u32,
    ) -> Result<i64, ApiError> {
        Self::create_identity(
            persistence,
            username,
            password,
            &[AuthRole::Employee],
            bcrypt_cost,
        )
    }

    /// Creates the bootstrap administrator unless the username already
    /// exists. Returns whether an identity was created.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Self::register`],
    /// except that an existing username is not an error.
    pub fn ensure_admin(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
        bcrypt_cost: u32,
    ) -> Result<bool, ApiError> {
        if persistence
            .username_exists(username.trim())
            .map_err(Self::internal)?
        {
            return Ok(false);
        }

        Self::create_identity(
            persistence,
            username,
            password,
            &[AuthRole::Admin],
            bcrypt_cost,
        )?;
        Ok(true)
    }

    fn create_identity(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
        roles: &[AuthRole],
        bcrypt_cost: u32,
    ) -> Result<i64, ApiError> {
        let username: &str = username.trim();
        if username.is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("username"),
                message: String::from("Username must not be blank"),
            });
        }

        if persistence
            .username_exists(username)
            .map_err(Self::internal)?
        {
            warn!(username, "Registration rejected: username taken");
            return Err(ApiError::UsernameTaken);
        }

        PasswordPolicy::default().validate(password, username)?;

        let password_hash: String =
            bcrypt::hash(password, bcrypt_cost).map_err(|e| ApiError::Internal {
                message: format!("Failed to hash password: {e}"),
            })?;

        let role_names: Vec<&str> = roles.iter().map(|role| role.as_str()).collect();
        let user_id: i64 = persistence
            .create_user(username, &password_hash, &role_names)
            .map_err(|e| match e {
                // Lost a race with a concurrent registration
                PersistenceError::ConstraintViolation(_) => ApiError::UsernameTaken,
                other => Self::internal(other),
            })?;

        info!(user_id, username, roles = ?roles, "Login identity created");
        Ok(user_id)
    }

    /// Verifies a username and password and issues an access token.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the credentials do not
    /// match or the token cannot be issued.
    pub fn login(
        persistence: &mut Persistence,
        tokens: &TokenService,
        username: &str,
        password: &str,
        now: OffsetDateTime,
    ) -> Result<(String, AuthenticatedActor), AuthError> {
        let username: &str = username.trim();
        let credentials: UserCredentials = persistence
            .get_credentials_by_username(username)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| {
                warn!(username, "Login rejected: unknown user");
                Self::invalid_credentials()
            })?;

        let verified: bool = bcrypt::verify(password, &credentials.password_hash).map_err(|e| {
            AuthError::AuthenticationFailed {
                reason: format!("Failed to verify password: {e}"),
            }
        })?;
        if !verified {
            warn!(username, "Login rejected: wrong password");
            return Err(Self::invalid_credentials());
        }

        let actor: AuthenticatedActor = Self::load_actor(persistence, username)?;
        let token: String = tokens.issue(username, now)?;

        info!(username, "User logged in");
        Ok((token, actor))
    }

    /// Validates a bearer token and reloads the caller's roles.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the token is invalid or
    /// expired, or its subject no longer exists.
    pub fn authenticate_token(
        persistence: &mut Persistence,
        tokens: &TokenService,
        token: &str,
    ) -> Result<AuthenticatedActor, AuthError> {
        let subject: String = tokens.validate(token)?.sub;
        Self::load_actor(persistence, &subject)
    }

    fn load_actor(
        persistence: &mut Persistence,
        username: &str,
    ) -> Result<AuthenticatedActor, AuthError> {
        let account: UserAccount = persistence
            .find_user_by_username(username)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: format!("Unknown user: {username}"),
            })?;

        Ok(AuthenticatedActor::from(&account))
    }

    fn invalid_credentials() -> AuthError {
        AuthError::AuthenticationFailed {
            reason: String::from(Self::INVALID_CREDENTIALS),
        }
    }

    fn internal(err: PersistenceError) -> ApiError {
        ApiError::Internal {
            message: format!("Database error: {err}"),
        }
    }

    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}
