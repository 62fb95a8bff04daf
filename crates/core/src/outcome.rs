// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The outcome envelope returned by every core operation.
//!
//! Operations return [`Outcome<T>`], a plain `Result` whose error side
//! carries a closed [`ErrorKind`]. Transports pick status codes from the
//! kind and never inspect message text. [`Envelope`] is the serialized
//! `{success, data, message, errors}` shape sent to callers.

use serde::Serialize;

/// Classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced entity does not exist.
    NotFound,
    /// Caller-supplied data violates a validation rule.
    InvalidInput,
    /// A business invariant or store constraint would be violated.
    Conflict,
    /// The store failed for reasons unrelated to the request's content.
    Storage,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
            Self::Conflict => "conflict",
            Self::Storage => "storage",
        }
    }
}

/// A successful operation's payload and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Success<T> {
    pub data: T,
    pub message: String,
}

impl<T> Success<T> {
    #[must_use]
    pub fn new(data: T, message: &str) -> Self {
        Self {
            data,
            message: message.to_string(),
        }
    }

    /// Transforms the payload, keeping the message.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Success<U> {
        Success {
            data: f(self.data),
            message: self.message,
        }
    }
}

/// A failed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: ErrorKind,
    /// Short, stable summary (e.g. "Employee not found").
    pub message: String,
    /// Details naming the offending value.
    pub errors: Vec<String>,
}

impl Failure {
    #[must_use]
    pub fn new(kind: ErrorKind, message: &str, detail: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.to_string(),
            errors: vec![detail.into()],
        }
    }

    #[must_use]
    pub fn not_found(message: &str, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message, detail)
    }

    #[must_use]
    pub fn invalid_input(message: &str, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message, detail)
    }

    #[must_use]
    pub fn conflict(message: &str, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message, detail)
    }

    #[must_use]
    pub fn storage(message: &str, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message, detail)
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if !self.errors.is_empty() {
            write!(f, ": {}", self.errors.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for Failure {}

/// Result of a core operation.
pub type Outcome<T> = Result<Success<T>, Failure>;

/// Serialized form of an [`Outcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
    pub errors: Vec<String>,
}

impl<T> Envelope<T> {
    /// Builds a failed envelope directly, for failures raised outside the core
    /// such as authentication.
    #[must_use]
    pub fn failure(message: &str, errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.to_string(),
            errors,
        }
    }

    /// Transforms the payload of a successful envelope.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            data: self.data.map(f),
            message: self.message,
            errors: self.errors,
        }
    }
}

impl<T> From<Outcome<T>> for Envelope<T> {
    fn from(outcome: Outcome<T>) -> Self {
        match outcome {
            Ok(success) => Self {
                success: true,
                data: Some(success.data),
                message: success.message,
                errors: Vec::new(),
            },
            Err(failure) => Self {
                success: false,
                data: None,
                message: failure.message,
                errors: failure.errors,
            },
        }
    }
}
