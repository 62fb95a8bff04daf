// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rules a password must meet before a login identity is created.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password needs at least {required} characters")]
    TooShort { required: usize },

    #[error(
        "Password needs characters from at least {required} classes (upper case, lower case, digits, symbols); it has {found}"
    )]
    TooFewCharacterClasses { required: usize, found: usize },

    #[error("Password cannot be the same as the username")]
    SameAsUsername,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    Digit,
    Symbol,
}

impl CharClass {
    const ALL: [Self; 4] = [Self::Upper, Self::Lower, Self::Digit, Self::Symbol];

    fn of(c: char) -> Option<Self> {
        match c {
            c if c.is_whitespace() => None,
            c if c.is_ascii_uppercase() => Some(Self::Upper),
            c if c.is_ascii_lowercase() => Some(Self::Lower),
            c if c.is_ascii_digit() => Some(Self::Digit),
            _ => Some(Self::Symbol),
        }
    }
}

/// Length and character-class requirements for passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_chars: usize,
    /// Out of upper case, lower case, digits and symbols.
    pub min_classes: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_chars: 8,
            min_classes: 2,
        }
    }
}

impl PasswordPolicy {
    /// Checks `password` for the identity `username`.
    ///
    /// Length is checked first, then character classes, then the
    /// case-insensitive comparison with the username.
    ///
    /// # Errors
    ///
    /// Returns the first rule the password breaks.
    pub fn validate(&self, password: &str, username: &str) -> Result<(), PasswordPolicyError> {
        if password.chars().count() < self.min_chars {
            return Err(PasswordPolicyError::TooShort {
                required: self.min_chars,
            });
        }

        let found: usize = Self::classes_in(password);
        if found < self.min_classes {
            return Err(PasswordPolicyError::TooFewCharacterClasses {
                required: self.min_classes,
                found,
            });
        }

        if password.eq_ignore_ascii_case(username) {
            return Err(PasswordPolicyError::SameAsUsername);
        }

        Ok(())
    }

    fn classes_in(password: &str) -> usize {
        let present: Vec<CharClass> = password.chars().filter_map(CharClass::of).collect();
        CharClass::ALL
            .iter()
            .filter(|class| present.contains(class))
            .count()
    }
}
