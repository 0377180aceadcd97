/// Joke Route
///
/// Serves a dad joke, optionally filtered by a preference substring.
use actix_web::{web, HttpResponse};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::ApiError;

/// Returned when no stored joke matches the request.
const FALLBACK_SETUP: &str = "Why don't eggs tell jokes?";
const FALLBACK_PUNCHLINE: &str = "Because they'd crack each other up.";

#[derive(Deserialize)]
pub struct JokeQuery {
    pub preference: Option<String>,
}

#[derive(Serialize)]
pub struct JokeResponse {
    pub setup: String,
    pub punchline: String,
}

/// Escape LIKE wildcards so the preference matches as literal text.
fn escape_like(preference: &str) -> String {
    preference
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// GET /joke
///
/// With a `preference` query parameter, considers up to 10 jokes whose
/// setup contains it as a substring; without one, up to 10 jokes in store
/// order. One candidate is picked uniformly at random. An empty candidate
/// set yields the fixed fallback joke.
///
/// # Errors
/// - 500: store fault
pub async fn get_joke(
    query: web::Query<JokeQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let candidates: Vec<(String, String)> = match query.preference.as_deref() {
        Some(preference) if !preference.is_empty() => {
            sqlx::query_as(
                r#"
                SELECT setup, punchline FROM jokes
                WHERE setup LIKE '%' || $1 || '%'
                LIMIT 10
                "#,
            )
            .bind(escape_like(preference))
            .fetch_all(pool.get_ref())
            .await?
        }
        _ => {
            sqlx::query_as("SELECT setup, punchline FROM jokes LIMIT 10")
                .fetch_all(pool.get_ref())
                .await?
        }
    };

    let joke = match candidates.choose(&mut rand::thread_rng()) {
        Some((setup, punchline)) => JokeResponse {
            setup: setup.clone(),
            punchline: punchline.clone(),
        },
        None => {
            tracing::debug!("No candidate jokes, serving fallback");
            JokeResponse {
                setup: FALLBACK_SETUP.to_string(),
                punchline: FALLBACK_PUNCHLINE.to_string(),
            }
        }
    };

    Ok(HttpResponse::Ok().json(joke))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_passes_plain_text_through() {
        assert_eq!(escape_like("science"), "science");
    }

    #[test]
    fn test_escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_c"), "a\\_c");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
