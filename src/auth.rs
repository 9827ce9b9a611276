//! Identity collaborator: password digests and bearer tokens
//!
//! The trade core never looks inside a token. Callers verify here, get back
//! an account address, and the core trusts that address completely.

use crate::error::AuthError;
use chrono::{Duration, Utc};
use uuid7::uuid7;

pub struct Authenticator {
    secret: String,
    ttl: Duration,
}

impl Authenticator {
    pub fn new(secret: impl Into<String>) -> Self {
        Self::with_ttl(secret, Duration::hours(1))
    }

    pub fn with_ttl(secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Issue a bearer token for an account address.
    ///
    /// Format is `address.expiry.signature`; bech32 addresses never contain
    /// a dot, so splitting is unambiguous.
    pub fn issue(&self, address: &str) -> String {
        let expiry = (Utc::now() + self.ttl).timestamp();
        let signature = self.sign(address, expiry);
        format!("{address}.{expiry}.{signature}")
    }

    /// Verify a token and return the address it vouches for.
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        let mut parts = token.split('.');
        let (Some(address), Some(expiry), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::Malformed);
        };

        let expiry: i64 = expiry.parse().map_err(|_| AuthError::Malformed)?;
        if self.sign(address, expiry) != signature {
            return Err(AuthError::BadSignature);
        }
        if expiry <= Utc::now().timestamp() {
            return Err(AuthError::Expired);
        }

        Ok(address.to_string())
    }

    fn sign(&self, address: &str, expiry: i64) -> String {
        sha256::digest(format!("{}|{address}|{expiry}", self.secret))
    }
}

/// Salted password digest stored on the account record.
pub fn digest_password(salt: &str, password: &str) -> String {
    sha256::digest(format!("{salt}:{password}"))
}

/// Mint a fresh salt for a new account.
pub fn new_salt() -> String {
    hex::encode(uuid7().as_bytes())
}
