// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! All queries use Diesel DSL and return domain types. Lookups by key
//! return `Ok(None)` when no row matches.
//!
//! ## Module Organization
//!
//! - `users` — Login identities, role assignments and role reference data
//! - `departments` — Departments
//! - `employees` — Employees with department, role and user resolved
//! - `leave_requests` — Leave requests and the approved-overlap query

pub mod departments;
pub mod employees;
pub mod leave_requests;
pub mod users;
