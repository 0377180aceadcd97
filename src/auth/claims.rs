/// JWT Claims structure
///
/// Payload of both access and refresh tokens: the subject is the user's
/// email address, plus standard JWT claims (RFC 7519).
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
    /// Token ID; keeps tokens minted in the same second distinct
    pub jti: String,
}

impl Claims {
    /// Create new claims for a subject, expiring `expiry_seconds` from now.
    pub fn new(subject: String, expiry_seconds: i64, issuer: String) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: subject,
            exp: now + expiry_seconds,
            iat: now,
            iss: issuer,
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Check if token has expired
    pub fn is_expired(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        self.exp < now
    }
}
