// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request extractors whose rejections use the outcome envelope.
//!
//! Axum's own `Json`, `Path` and `Query` rejections answer with plain text.
//! These wrappers turn a malformed request into an `InvalidInput` failure so
//! that every response body has the same shape.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use leavedesk::{Failure, Outcome};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::respond;

/// A JSON request body.
pub struct Body<T>(pub T);

/// A single numeric path segment such as `/api/departments/{id}`.
pub struct PathId(pub i64);

/// A deserialized query string.
pub struct QueryParams<T>(pub T);

/// A request whose shape could not be decoded.
#[derive(Debug)]
pub struct MalformedRequest {
    message: &'static str,
    detail: String,
}

impl MalformedRequest {
    fn new(message: &'static str, detail: String) -> Self {
        debug!(reason = message, %detail, "Rejected malformed request");
        Self { message, detail }
    }
}

impl IntoResponse for MalformedRequest {
    fn into_response(self) -> Response {
        let outcome: Outcome<()> = Err(Failure::invalid_input(self.message, self.detail));
        respond(outcome, StatusCode::OK)
    }
}

impl<T, S> FromRequest<S> for Body<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = MalformedRequest;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|e| MalformedRequest::new("Invalid request body", e.body_text()))
    }
}

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = MalformedRequest;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<i64>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| Self(id))
            .map_err(|e| MalformedRequest::new("Invalid path parameter", e.body_text()))
    }
}

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = MalformedRequest;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|e| MalformedRequest::new("Invalid query string", e.body_text()))
    }
}
