// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Session tokens — HS256 JWTs carrying the identity of the logged-in user.
//
// Claim names (`usuario`, `nome`) follow the tokens already handed out by
// the login service, so existing browser sessions stay valid.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use fastprint_core::error::{FastPrintError, Result};

/// Identity carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: i64,
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "nome")]
    pub name: String,
    /// Expiry as a Unix timestamp (seconds).
    pub exp: i64,
}

impl SessionClaims {
    /// Claims that expire `ttl` from now.
    pub fn new(user_id: i64, username: &str, name: &str, ttl: Duration) -> Self {
        Self {
            user_id,
            username: username.to_owned(),
            name: name.to_owned(),
            exp: (Utc::now() + ttl).timestamp(),
        }
    }
}

/// Verifies (and, for whoever owns the secret, mints) session tokens.
#[derive(Clone)]
pub struct SessionVerifier {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Decode and validate `token`.  Expired, malformed, or foreign-signed
    /// tokens are `FastPrintError::Token`.
    pub fn verify(&self, token: &str) -> Result<SessionClaims> {
        let data = decode::<SessionClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|e| FastPrintError::Token(e.to_string()))?;
        debug!(user_id = data.claims.user_id, "session token verified");
        Ok(data.claims)
    }

    /// Sign `claims` into a token.
    pub fn issue(&self, claims: &SessionClaims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| FastPrintError::Token(e.to_string()))
    }
}

impl std::fmt::Debug for SessionVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionVerifier { .. }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies() {
        let verifier = SessionVerifier::new("secret");
        let claims = SessionClaims::new(7, "mlima", "Maria Lima", Duration::hours(8));
        let token = verifier.issue(&claims).unwrap();
        assert_eq!(verifier.verify(&token).unwrap(), claims);
    }

    #[test]
    fn expired_token_is_rejected() {
        let verifier = SessionVerifier::new("secret");
        let claims = SessionClaims::new(7, "mlima", "Maria Lima", Duration::hours(-2));
        let token = verifier.issue(&claims).unwrap();
        assert!(matches!(verifier.verify(&token), Err(FastPrintError::Token(_))));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = SessionClaims::new(1, "a", "A", Duration::hours(1));
        let token = SessionVerifier::new("one").issue(&claims).unwrap();
        assert!(SessionVerifier::new("two").verify(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        let verifier = SessionVerifier::new("secret");
        assert!(verifier.verify("not-a-token").is_err());
        assert!(verifier.verify("").is_err());
    }
}
