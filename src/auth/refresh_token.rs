/// Refresh Token Records
///
/// A refresh token is only accepted while a matching `auth_tokens` row is
/// live. Tokens are hashed with SHA-256 before storage (never store
/// plaintext); "exact token match" is exact hash match. Rotation updates
/// the matched row in place with a single conditional write, so the old
/// token value stops matching the moment the new one is stored.
use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;

/// Hash a refresh token using SHA-256
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Save a freshly issued refresh token for a user.
///
/// Each login adds a row, so the user's expired rows are pruned here to
/// keep the table bounded by live sessions.
///
/// # Errors
/// Returns error if the database operation fails
pub async fn save_refresh_token(
    pool: &PgPool,
    user_id: Uuid,
    token: &str,
    expiry_seconds: i64,
) -> Result<(), ApiError> {
    let token_hash = hash_token(token);
    let expires_at = Utc::now() + Duration::seconds(expiry_seconds);

    sqlx::query("DELETE FROM auth_tokens WHERE user_id = $1 AND expires_at < $2")
        .bind(user_id)
        .bind(Utc::now())
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO auth_tokens (id, user_id, token_hash, expires_at, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(token_hash)
    .bind(expires_at)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}

/// Match a presented refresh token against its persisted record.
///
/// The record must exist and its expiry must be in the future.
///
/// # Returns
/// User ID associated with the token if a live record matches
///
/// # Errors
/// `ApiError::ExpiredOrUnknownToken` if no record matches or it has expired
pub async fn validate_refresh_token(pool: &PgPool, token: &str) -> Result<Uuid, ApiError> {
    let token_hash = hash_token(token);

    let result = sqlx::query_as::<_, (Uuid, chrono::DateTime<Utc>)>(
        r#"
        SELECT user_id, expires_at
        FROM auth_tokens
        WHERE token_hash = $1
        "#,
    )
    .bind(&token_hash)
    .fetch_optional(pool)
    .await?;

    match result {
        None => {
            tracing::warn!("Refresh token not found in database");
            Err(ApiError::ExpiredOrUnknownToken)
        }
        Some((user_id, expires_at)) => {
            if expires_at < Utc::now() {
                tracing::info!(user_id = %user_id, "Refresh token expired");
                return Err(ApiError::ExpiredOrUnknownToken);
            }

            Ok(user_id)
        }
    }
}

/// Rotate a refresh token: the row matching `old_token` is updated in
/// place to hold `new_token` with a fresh expiry.
///
/// The conditional `UPDATE` is the only write, so concurrent rotations of
/// the same token value resolve to exactly one winner; the loser sees
/// zero rows affected.
///
/// # Errors
/// `ApiError::ExpiredOrUnknownToken` if no row matched the old token
pub async fn rotate_refresh_token(
    pool: &PgPool,
    old_token: &str,
    new_token: &str,
    expiry_seconds: i64,
) -> Result<(), ApiError> {
    let old_hash = hash_token(old_token);
    let new_hash = hash_token(new_token);
    let expires_at = Utc::now() + Duration::seconds(expiry_seconds);

    let result = sqlx::query(
        r#"
        UPDATE auth_tokens
        SET token_hash = $1, expires_at = $2
        WHERE token_hash = $3
        "#,
    )
    .bind(new_hash)
    .bind(expires_at)
    .bind(old_hash)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        tracing::warn!("Refresh token disappeared during rotation");
        return Err(ApiError::ExpiredOrUnknownToken);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_hashing_is_deterministic() {
        let token = "some.refresh.token";
        let hash1 = hash_token(token);
        let hash2 = hash_token(token);

        assert_eq!(hash1, hash2);
        assert_ne!(token, hash1);
        // SHA-256 hex is 64 chars
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_tokens_different_hashes() {
        let hash1 = hash_token("first.token");
        let hash2 = hash_token("second.token");

        assert_ne!(hash1, hash2);
    }
}
