// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave status transition policies.
//!
//! Every status change made by a reviewer passes through a single
//! [`TransitionPolicy::check`] call. The default policy accepts any change,
//! so a reviewer can always correct an earlier decision.

use crate::error::DomainError;
use crate::types::LeaveStatus;

/// Decides whether a leave request may move from one status to another.
pub trait TransitionPolicy: Send + Sync {
    /// # Errors
    ///
    /// Returns `DomainError::IllegalStatusTransition` if the change is refused.
    fn check(&self, from: LeaveStatus, to: LeaveStatus) -> Result<(), DomainError>;
}

/// Accepts every transition, including moving a decided request back to `PENDING`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveTransitions;

impl TransitionPolicy for PermissiveTransitions {
    fn check(&self, _from: LeaveStatus, _to: LeaveStatus) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Only pending requests may change status.
///
/// Re-applying the current status is always accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingOnlyTransitions;

impl TransitionPolicy for PendingOnlyTransitions {
    fn check(&self, from: LeaveStatus, to: LeaveStatus) -> Result<(), DomainError> {
        if from == to || from == LeaveStatus::Pending {
            return Ok(());
        }

        Err(DomainError::IllegalStatusTransition {
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        })
    }
}
