// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Declarative path-based access rules.
//!
//! Rules are evaluated in order and the first matching pattern decides.
//! A pattern ending in `/**` matches its prefix and everything below it;
//! any other pattern matches the exact path. Paths matching no rule
//! require authentication only.

use crate::auth::{AuthRole, AuthenticatedActor};

/// What a rule demands of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No token needed.
    Public,
    /// Any valid token.
    Authenticated,
    /// A valid token whose user holds at least one of these roles.
    AnyOf(&'static [AuthRole]),
}

/// Result of checking a request against the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// No valid identity for a protected path.
    Unauthenticated,
    /// Identity present but lacking the required role.
    Forbidden { required: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AccessRule {
    pattern: &'static str,
    access: Access,
}

/// Ordered list of access rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new()
            .rule("/api/auth/**", Access::Public)
            .rule("/api/leaves/submit", Access::AnyOf(&[AuthRole::Employee]))
            .rule(
                "/api/leaves/**",
                Access::AnyOf(&[AuthRole::Admin, AuthRole::Manager]),
            )
            .rule("/api/departments/**", Access::AnyOf(&[AuthRole::Admin]))
            .rule("/api/employees/**", Access::AnyOf(&[AuthRole::Admin]))
    }
}

impl AccessPolicy {
    /// An empty policy: every path requires authentication.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule; earlier rules take precedence.
    #[must_use]
    pub fn rule(mut self, pattern: &'static str, access: Access) -> Self {
        self.rules.push(AccessRule { pattern, access });
        self
    }

    /// The requirement for `path`.
    #[must_use]
    pub fn access_for(&self, path: &str) -> Access {
        self.rules
            .iter()
            .find(|rule| pattern_matches(rule.pattern, path))
            .map_or(Access::Authenticated, |rule| rule.access)
    }

    /// Decides whether `actor` may call `path`.
    #[must_use]
    pub fn decide(&self, path: &str, actor: Option<&AuthenticatedActor>) -> AccessDecision {
        match (self.access_for(path), actor) {
            (Access::Public, _) => AccessDecision::Allow,
            (_, None) => AccessDecision::Unauthenticated,
            (Access::Authenticated, Some(_)) => AccessDecision::Allow,
            (Access::AnyOf(roles), Some(actor)) => {
                if actor.has_any_role(roles) {
                    AccessDecision::Allow
                } else {
                    AccessDecision::Forbidden {
                        required: roles
                            .iter()
                            .map(|role| role.as_str())
                            .collect::<Vec<_>>()
                            .join(" or "),
                    }
                }
            }
        }
    }
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    let path: &str = path.strip_suffix('/').unwrap_or(path);
    pattern.strip_suffix("/**").map_or_else(
        || pattern == path,
        |prefix| {
            path.strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        },
    )
}
