/// Password Hashing and Verification
///
/// bcrypt with the default cost factor. Verification never panics: a
/// malformed stored hash counts as a failed match.
use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::ApiError;

/// Hash a password using bcrypt.
///
/// Users are provisioned out of band (there is no signup endpoint), so
/// this is used by seeding tooling and tests.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its stored hash.
///
/// Returns `false` for a mismatch or a malformed hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match verify(password, hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!("Password verification failed: {}", e);
            false
        }
    }
}
