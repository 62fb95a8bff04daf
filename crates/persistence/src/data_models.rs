// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Stored login credentials.
///
/// Only the authentication layer sees this; everything else works with
/// `UserAccount`, which carries no password material.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user_id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
}
