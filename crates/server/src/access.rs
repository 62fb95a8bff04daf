// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Access-policy middleware.
//!
//! Every request is checked against the [`AccessPolicy`] before it reaches
//! a handler. Public paths pass straight through. Everything else needs an
//! `Authorization: Bearer <token>` header whose token validates and whose
//! user currently holds a role the policy accepts for the path.

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use leavedesk::Envelope;
use leavedesk_api::{Access, AccessDecision, AuthenticatedActor, AuthenticationService};
use tracing::{debug, warn};

use crate::AppState;

/// Runs the access policy for the request path.
///
/// On success the [`AuthenticatedActor`] is stored in the request
/// extensions.
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if the path is protected and:
/// - Authorization header is missing
/// - Authorization header format is invalid
/// - The token is invalid or expired, or its user no longer exists
///
/// Returns HTTP 403 Forbidden if the user lacks every accepted role.
pub async fn require_access(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AccessError> {
    let path: String = request.uri().path().to_string();

    if state.access_policy.access_for(&path) == Access::Public {
        return Ok(next.run(request).await);
    }

    let token: String = bearer_token(request.headers())?;

    let actor: AuthenticatedActor = {
        let mut persistence = state.persistence.lock().await;
        AuthenticationService::authenticate_token(&mut persistence, &state.tokens, &token)
            .map_err(|e| {
                warn!(error = %e, path = %path, "Token validation failed");
                AccessError::InvalidToken(e.to_string())
            })?
    };

    match state.access_policy.decide(&path, Some(&actor)) {
        AccessDecision::Allow => {
            debug!(username = %actor.username, path = %path, "Access granted");
            request.extensions_mut().insert(actor);
            Ok(next.run(request).await)
        }
        AccessDecision::Forbidden { required } => {
            warn!(username = %actor.username, path = %path, %required, "Access denied");
            Err(AccessError::Forbidden { required })
        }
        AccessDecision::Unauthenticated => Err(AccessError::MissingAuthorizationHeader),
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<String, AccessError> {
    let header: &str = headers
        .get("Authorization")
        .ok_or_else(|| {
            debug!("Missing Authorization header");
            AccessError::MissingAuthorizationHeader
        })?
        .to_str()
        .map_err(|_| {
            warn!("Invalid Authorization header encoding");
            AccessError::InvalidAuthorizationHeader
        })?;

    header
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            AccessError::InvalidAuthorizationHeader
        })
}

/// Access check failures.
#[derive(Debug)]
pub enum AccessError {
    MissingAuthorizationHeader,
    InvalidAuthorizationHeader,
    InvalidToken(String),
    Forbidden { required: String },
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        let (status, message, detail): (StatusCode, &str, String) = match self {
            Self::MissingAuthorizationHeader => (
                StatusCode::UNAUTHORIZED,
                "Authentication required",
                String::from("Missing Authorization header"),
            ),
            Self::InvalidAuthorizationHeader => (
                StatusCode::UNAUTHORIZED,
                "Authentication required",
                String::from("Invalid Authorization header format. Expected: 'Bearer <token>'"),
            ),
            Self::InvalidToken(reason) => (
                StatusCode::UNAUTHORIZED,
                "JWT incorrect or expired",
                reason,
            ),
            Self::Forbidden { required } => (
                StatusCode::FORBIDDEN,
                "Access denied",
                format!("Requires {required} role"),
            ),
        };

        (status, Json(Envelope::<()>::failure(message, vec![detail]))).into_response()
    }
}
