// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A leave request starts before the current date.
    StartDateInPast {
        /// The requested start date.
        start: Date,
        /// The date the request was evaluated against.
        today: Date,
    },
    /// A leave request ends before it starts.
    EndBeforeStart {
        /// The requested start date.
        start: Date,
        /// The requested end date.
        end: Date,
    },
    /// Employee name is empty or invalid.
    InvalidName(String),
    /// Employee email is empty or malformed.
    InvalidEmail(String),
    /// Department name is empty or invalid.
    InvalidDepartmentName(String),
    /// Leave status string is not recognized.
    InvalidLeaveStatus {
        /// The unrecognized status.
        status: String,
    },
    /// A leave status change was refused by the configured transition policy.
    IllegalStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// Failed to parse a date string.
    DateParseError {
        /// The date string that failed to parse.
        date_string: String,
        /// The underlying parse error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StartDateInPast { .. } => {
                write!(f, "Leave request start date cannot be in the past")
            }
            Self::EndBeforeStart { .. } => {
                write!(f, "End date cannot be before start date")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidDepartmentName(msg) => write!(f, "Invalid department name: {msg}"),
            Self::InvalidLeaveStatus { status } => {
                write!(f, "Invalid leave status: {status}")
            }
            Self::IllegalStatusTransition { from, to } => {
                write!(f, "Cannot change leave status from {from} to {to}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
