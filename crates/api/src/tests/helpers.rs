// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use leavedesk::EntityStore;
use leavedesk_domain::{Department, Employee, Role};
use leavedesk_persistence::Persistence;
use time::{Date, Duration, macros::date};

use crate::{AuthRole, AuthenticatedActor, AuthenticationService, TokenConfig, TokenService};

/// Lowest cost bcrypt accepts; keeps the suite fast.
pub const TEST_BCRYPT_COST: u32 = 4;

pub const TEST_SECRET: &str = "an-unremarkable-test-secret-of-forty-bytes";

pub const TODAY: Date = date!(2026 - 03 - 10);

pub fn create_test_tokens() -> TokenService {
    TokenService::new(TokenConfig {
        secret: String::from(TEST_SECRET),
        ttl: Duration::minutes(60),
        issuer: String::from("leavedesk"),
    })
    .unwrap()
}

pub fn create_test_actor(roles: &[AuthRole]) -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("someone"), roles.to_vec())
}

pub struct Seeded {
    pub persistence: Persistence,
    pub engineering: Department,
    pub developer: Role,
    pub ada: Employee,
}

/// A database with one department, a "Developer" business role and an
/// employee "ada" whose login identity was registered normally.
pub fn create_seeded_persistence() -> Seeded {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    AuthenticationService::register(&mut persistence, "ada", "lovelace1815", TEST_BCRYPT_COST)
        .unwrap();

    let engineering: Department = persistence
        .save_department(&Department::new("Engineering", None))
        .unwrap();
    let developer: Role = persistence.create_role("Developer").unwrap();
    let user = persistence.find_user_by_username("ada").unwrap().unwrap();
    let ada: Employee = persistence
        .save_employee(&Employee {
            employee_id: None,
            name: String::from("Ada Lovelace"),
            email: String::from("ada@example.com"),
            department: engineering.clone(),
            role: developer.clone(),
            user,
        })
        .unwrap();

    Seeded {
        persistence,
        engineering,
        developer,
        ada,
    }
}
