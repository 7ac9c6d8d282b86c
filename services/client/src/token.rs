//! Bearer token inspection
//!
//! The client never verifies a token; that is the backend's job. It only reads
//! the claims so an expired session can be dropped without a round trip.

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    exp: Option<i64>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    roles: Option<Vec<String>>,
}

/// Claims of a bearer token, read without verifying its signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub subject: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub roles: Vec<String>,
}

impl TokenInfo {
    /// Read the claims of `token`
    ///
    /// Fails when the token is not a JWT at all.
    pub fn inspect(token: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let header = decode_header(token)?;

        let mut validation = Validation::new(header.alg);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?.claims;

        let mut roles = claims.roles.unwrap_or_default();
        if let Some(role) = claims.role {
            roles.push(role);
        }

        Ok(Self {
            subject: claims.sub,
            expires_at: claims.exp.and_then(|exp| DateTime::from_timestamp(exp, 0)),
            roles,
        })
    }

    /// Whether the token had expired at `now`; tokens without `exp` never do
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
