/// JWT Token Generation and Validation
///
/// One HS256 signing secret, taken from configuration, covers both the
/// short-lived access token and the longer-lived refresh token; the two
/// differ only in their expiry.
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::Claims;
use crate::configuration::JwtSettings;
use crate::error::ApiError;

/// Generate an access token for a subject, valid for
/// `config.access_token_expiry` seconds.
pub fn generate_access_token(subject: &str, config: &JwtSettings) -> Result<String, ApiError> {
    generate_token(subject, config.access_token_expiry, config)
}

/// Generate a refresh token for a subject, valid for
/// `config.refresh_token_expiry` seconds.
///
/// The token itself is self-contained; server-side revocability comes
/// from the persisted record kept alongside it (see `refresh_token`).
pub fn generate_refresh_token(subject: &str, config: &JwtSettings) -> Result<String, ApiError> {
    generate_token(subject, config.refresh_token_expiry, config)
}

fn generate_token(
    subject: &str,
    expiry_seconds: i64,
    config: &JwtSettings,
) -> Result<String, ApiError> {
    let claims = Claims::new(subject.to_string(), expiry_seconds, config.issuer.clone());

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Token generation failed: {}", e)))
}

/// Validate a token's signature, expiry, and issuer; returns its claims.
///
/// # Errors
/// `ApiError::InvalidToken` if the signature is invalid, the payload is
/// unparseable, or the token has expired.
pub fn validate_token(token: &str, config: &JwtSettings) -> Result<Claims, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::warn!("JWT validation error: {}", e);
        ApiError::InvalidToken
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_config() -> JwtSettings {
        JwtSettings {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 1800,
            refresh_token_expiry: 604800,
            issuer: "test".to_string(),
        }
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let config = get_test_config();
        let email = "test@example.com";

        let token = generate_access_token(email, &config).expect("Failed to generate token");
        let claims = validate_token(&token, &config).expect("Failed to validate token");

        assert_eq!(claims.sub, email);
        assert_eq!(claims.iss, "test");
        assert_eq!(claims.exp - claims.iat, 1800);
    }

    #[test]
    fn test_refresh_token_has_longer_expiry() {
        let config = get_test_config();

        let token =
            generate_refresh_token("test@example.com", &config).expect("Failed to generate token");
        let claims = validate_token(&token, &config).expect("Failed to validate token");

        assert_eq!(claims.exp - claims.iat, 604800);
    }

    #[test]
    fn test_invalid_token() {
        let config = get_test_config();
        let result = validate_token("invalid.token.here", &config);

        assert!(result.is_err());
    }

    #[test]
    fn test_tampered_token() {
        let config = get_test_config();

        let token =
            generate_access_token("test@example.com", &config).expect("Failed to generate token");

        let tampered = format!("{}X", token);
        let result = validate_token(&tampered, &config);

        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut config = get_test_config();
        config.access_token_expiry = -120;

        let token =
            generate_access_token("test@example.com", &config).expect("Failed to generate token");
        let result = validate_token(&token, &config);

        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_issuer() {
        let mut config = get_test_config();

        let token =
            generate_access_token("test@example.com", &config).expect("Failed to generate token");

        config.issuer = "wrong-issuer".to_string();
        let result = validate_token(&token, &config);

        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let mut config = get_test_config();

        let token =
            generate_access_token("test@example.com", &config).expect("Failed to generate token");

        config.secret = "another-secret-key-at-least-32-characters".to_string();
        let result = validate_token(&token, &config);

        assert!(result.is_err());
    }
}
