/// Feedback Route
///
/// Accepts user feedback. Failures here are soft: a missing user or a
/// store fault produces a `{success: false, message}` body rather than
/// an error status.
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::validators::is_valid_field;

const MAX_FEEDBACK_CONTENT_LENGTH: usize = 2000;
const MAX_FEEDBACK_TYPE_LENGTH: usize = 64;

#[derive(Deserialize)]
pub struct FeedbackRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "feedbackContent")]
    pub feedback_content: String,
    #[serde(rename = "feedbackType")]
    pub feedback_type: String,
}

#[derive(Serialize)]
pub struct FeedbackResponse {
    pub success: bool,
    pub message: String,
}

/// POST /feedback
///
/// Verifies the user exists, then inserts a feedback row. An unknown
/// user id answers `{success: false, message: "User not found."}` with
/// status 200; an unexpected store fault is converted to a generic soft
/// failure instead of propagating.
///
/// # Errors
/// - 400: empty or overlong content/type fields
pub async fn submit_feedback(
    form: web::Json<FeedbackRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let content = is_valid_field(
        "feedbackContent",
        &form.feedback_content,
        MAX_FEEDBACK_CONTENT_LENGTH,
    )?;
    let feedback_type =
        is_valid_field("feedbackType", &form.feedback_type, MAX_FEEDBACK_TYPE_LENGTH)?;

    let response = match insert_feedback(pool.get_ref(), &form.user_id, &content, &feedback_type)
        .await
    {
        Ok(Some(())) => FeedbackResponse {
            success: true,
            message: "Feedback submitted successfully.".to_string(),
        },
        Ok(None) => FeedbackResponse {
            success: false,
            message: "User not found.".to_string(),
        },
        Err(e) => {
            tracing::error!(error = %e, "Exception while submitting feedback");
            FeedbackResponse {
                success: false,
                message: "An error occurred while submitting feedback.".to_string(),
            }
        }
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Inserts the row if the user exists; `None` means unknown user.
async fn insert_feedback(
    pool: &PgPool,
    user_id: &str,
    content: &str,
    feedback_type: &str,
) -> Result<Option<()>, ApiError> {
    // A user id that is not a UUID cannot match any stored user
    let user_id = match Uuid::parse_str(user_id) {
        Ok(id) => id,
        Err(_) => return Ok(None),
    };

    let user_exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    if user_exists.is_none() {
        return Ok(None);
    }

    sqlx::query(
        r#"
        INSERT INTO feedback (id, user_id, content, feedback_type, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(content)
    .bind(feedback_type)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(Some(()))
}
