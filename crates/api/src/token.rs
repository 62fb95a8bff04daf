// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer token issuance and validation.
//!
//! Tokens are HS512-signed JWTs carrying the username as subject. They hold
//! no roles; the role set is reloaded from the store on every request so a
//! revoked role takes effect before the token expires.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration, OffsetDateTime};

/// Shortest signing secret accepted, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Token errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Signing secret must be at least {min} bytes long")]
    SecretTooShort { min: usize },

    #[error("Token lifetime must be positive")]
    NonPositiveLifetime,

    #[error("Failed to issue token: {0}")]
    Issue(String),

    #[error("Token has expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Token service configuration.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC secret.
    pub secret: String,
    /// Lifetime of an issued token.
    pub ttl: Duration,
    /// Value of the `iss` claim, checked on validation.
    pub issuer: String,
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

/// Issues and validates access tokens.
#[derive(Clone)]
pub struct TokenService {
    ttl: Duration,
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Creates a token service.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::SecretTooShort` if the secret is shorter than
    /// [`MIN_SECRET_LEN`] bytes and `TokenError::NonPositiveLifetime` if
    /// `ttl` is zero or negative.
    pub fn new(config: TokenConfig) -> Result<Self, TokenError> {
        if config.secret.len() < MIN_SECRET_LEN {
            return Err(TokenError::SecretTooShort {
                min: MIN_SECRET_LEN,
            });
        }
        if !config.ttl.is_positive() {
            return Err(TokenError::NonPositiveLifetime);
        }

        Ok(Self {
            ttl: config.ttl,
            issuer: config.issuer,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        })
    }

    /// Issues a token for `username`, valid from `now` for the configured
    /// lifetime.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Issue` if the expiry is not representable or
    /// signing fails.
    pub fn issue(&self, username: &str, now: OffsetDateTime) -> Result<String, TokenError> {
        let expires_at: OffsetDateTime = now
            .checked_add(self.ttl)
            .ok_or_else(|| TokenError::Issue(String::from("expiry out of range")))?;

        let claims: Claims = Claims {
            sub: username.to_string(),
            iat: now.unix_timestamp(),
            exp: expires_at.unix_timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Issue(e.to_string()))
    }

    /// Validates signature, expiry and issuer and returns the claims.
    ///
    /// # Errors
    ///
    /// Returns a `TokenError` describing why the token was rejected.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation: Validation = Validation::new(Algorithm::HS512);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}
