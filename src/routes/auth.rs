/// Authentication Routes
///
/// Handles user login and refresh-token rotation.
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{
    generate_access_token, generate_refresh_token, rotate_refresh_token, save_refresh_token,
    validate_refresh_token, validate_token, verify_password,
};
use crate::configuration::JwtSettings;
use crate::error::{ApiError, ErrorContext};
use crate::validators::is_valid_email;

/// User login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: the access token plus the refresh token that the
/// refresh flow later expects to find persisted.
#[derive(Serialize)]
pub struct LoginResponse {
    pub jwt_token: String,
    pub expires_in: i64,
    pub refresh_token: String,
}

/// Token refresh request
#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token refresh response with the rotated pair
#[derive(Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// POST /auth/login
///
/// Authenticate with email and password. On success returns an access
/// token bound to the user's email plus a persisted refresh token.
///
/// # Errors
/// - 401: unknown email or wrong password (`WWW-Authenticate: Bearer`)
/// - 400: malformed request body
/// - 500: store fault
///
/// # Security Notes
/// - Same error for "not found" and "wrong password" to prevent
///   user enumeration
pub async fn login(
    form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, ApiError> {
    let context = ErrorContext::new("user_login");

    // A syntactically invalid email can never match a stored user
    let email = is_valid_email(&form.email).map_err(|_| ApiError::Authentication)?;

    let user = sqlx::query_as::<_, (Uuid, String, String)>(
        "SELECT id, email, password_hash FROM users WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or(ApiError::Authentication)?;

    let (user_id, user_email, password_hash) = user;

    if !verify_password(&form.password, &password_hash) {
        return Err(ApiError::Authentication);
    }

    let access_token = generate_access_token(&user_email, jwt_config.get_ref())?;
    let refresh_token = generate_refresh_token(&user_email, jwt_config.get_ref())?;

    save_refresh_token(
        pool.get_ref(),
        user_id,
        &refresh_token,
        jwt_config.refresh_token_expiry,
    )
    .await?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user_id,
        "User logged in successfully"
    );

    Ok(HttpResponse::Ok().json(LoginResponse {
        jwt_token: access_token,
        expires_in: jwt_config.access_token_expiry,
        refresh_token,
    }))
}

/// POST /auth/refresh
///
/// Exchange a refresh token for a new access+refresh pair.
/// The presented token must pass signature and expiry checks and match a
/// live persisted record; the record is then updated in place to hold the
/// new token (rotation), so the old value is one-shot.
///
/// # Errors
/// - 401: signature/expiry failure (`TOKEN_INVALID`) or no live record
///   (`TOKEN_EXPIRED_OR_UNKNOWN`)
/// - 500: store fault
pub async fn refresh(
    form: web::Json<RefreshRequest>,
    pool: web::Data<PgPool>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, ApiError> {
    let context = ErrorContext::new("token_refresh");

    // Signature, expiry, and issuer checks
    let claims = validate_token(&form.refresh_token, jwt_config.get_ref())?;

    // The embedded subject must be present
    if claims.sub.is_empty() {
        return Err(ApiError::InvalidToken);
    }

    // The token must match a live persisted record
    let user_id = validate_refresh_token(pool.get_ref(), &form.refresh_token).await?;

    let access_token = generate_access_token(&claims.sub, jwt_config.get_ref())?;
    let refresh_token = generate_refresh_token(&claims.sub, jwt_config.get_ref())?;

    // Single conditional write; a concurrent rotation of the same value
    // leaves zero rows for the loser, which reports the token as unknown
    rotate_refresh_token(
        pool.get_ref(),
        &form.refresh_token,
        &refresh_token,
        jwt_config.refresh_token_expiry,
    )
    .await?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user_id,
        "Token refreshed successfully"
    );

    Ok(HttpResponse::Ok().json(RefreshResponse {
        access_token,
        refresh_token,
    }))
}
