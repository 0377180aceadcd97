/// Preference Routes
///
/// Read and upsert preferences for the authenticated user. The current
/// user comes from the JWT middleware's claims; there is no implicit or
/// hardcoded identity anywhere in these handlers.
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::Claims;
use crate::error::{ApiError, ErrorContext};
use crate::validators::is_valid_field;

const MAX_PREFERENCE_TYPE_LENGTH: usize = 64;
const MAX_PREFERENCE_VALUE_LENGTH: usize = 256;

#[derive(Serialize)]
pub struct PreferenceDetail {
    pub preference_type: String,
    pub value: String,
}

#[derive(Serialize)]
pub struct PreferencesResponse {
    pub preferences: Vec<PreferenceDetail>,
}

#[derive(Deserialize)]
pub struct UpdatePreferencesRequest {
    pub preference_type: String,
    pub value: String,
}

#[derive(Serialize)]
pub struct UpdatePreferencesResponse {
    pub success: bool,
    pub message: String,
}

/// Resolve the authenticated subject (email) to a user id.
async fn current_user_id(pool: &PgPool, claims: &Claims) -> Result<Uuid, ApiError> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
        .bind(&claims.sub)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| {
            tracing::warn!(subject = %claims.sub, "Token subject has no user record");
            ApiError::Authentication
        })
}

/// GET /preferences
///
/// Returns all preference rows for the authenticated user as
/// (preference_type, value) pairs; the list may be empty.
///
/// # Errors
/// - 401: missing/invalid token (middleware) or subject without a user row
/// - 500: store fault
pub async fn get_preferences(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let user_id = current_user_id(pool.get_ref(), &claims).await?;

    let rows = sqlx::query_as::<_, (String, String)>(
        "SELECT preference_type, value FROM preferences WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_all(pool.get_ref())
    .await?;

    let preferences = rows
        .into_iter()
        .map(|(preference_type, value)| PreferenceDetail {
            preference_type,
            value,
        })
        .collect();

    Ok(HttpResponse::Ok().json(PreferencesResponse { preferences }))
}

/// PUT /preferences/update
///
/// Upserts the authenticated user's preference for a given type. The
/// write is a single `INSERT .. ON CONFLICT .. DO UPDATE` against the
/// `(user_id, preference_type)` uniqueness constraint, so concurrent
/// identical requests cannot produce duplicate rows or lost updates.
///
/// # Errors
/// - 400: empty or overlong preference_type/value
/// - 401: missing/invalid token (middleware)
/// - 500: store fault
pub async fn update_preferences(
    form: web::Json<UpdatePreferencesRequest>,
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let context = ErrorContext::new("preference_update");

    let preference_type = is_valid_field(
        "preference_type",
        &form.preference_type,
        MAX_PREFERENCE_TYPE_LENGTH,
    )?;
    let value = is_valid_field("value", &form.value, MAX_PREFERENCE_VALUE_LENGTH)?;

    let user_id = current_user_id(pool.get_ref(), &claims).await?;

    // xmax = 0 only on freshly inserted rows
    let inserted = sqlx::query_scalar::<_, bool>(
        r#"
        INSERT INTO preferences (id, user_id, preference_type, value)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id, preference_type)
        DO UPDATE SET value = EXCLUDED.value
        RETURNING (xmax = 0) AS inserted
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&preference_type)
    .bind(&value)
    .fetch_one(pool.get_ref())
    .await?;

    let message = if inserted {
        "Preference created successfully."
    } else {
        "Preference updated successfully."
    };

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user_id,
        preference_type = %preference_type,
        "Preference upserted"
    );

    Ok(HttpResponse::Ok().json(UpdatePreferencesResponse {
        success: true,
        message: message.to_string(),
    }))
}
