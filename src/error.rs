/// Application Error Handling
///
/// Unified error type for the whole service. Domain-specific failures
/// (authentication, token validation, input validation, storage) map to
/// explicit HTTP statuses; everything else is flattened at the router
/// boundary into a 500 response whose JSON body carries the message in
/// an `error` field.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::error::Error as StdError;
use std::fmt;

/// Validation errors for input data
#[derive(Debug, Clone)]
pub enum ValidationError {
    EmptyField(String),
    TooLong(String, usize),
    InvalidFormat(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField(field) => write!(f, "{} is empty", field),
            ValidationError::TooLong(field, max) => {
                write!(f, "{} is too long (maximum {} characters)", field, max)
            }
            ValidationError::InvalidFormat(field) => write!(f, "{} has invalid format", field),
        }
    }
}

impl StdError for ValidationError {}

/// Database operation errors
#[derive(Debug)]
pub enum DatabaseError {
    NotFound(String),
    ConnectionPool(String),
    UnexpectedError(String),
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DatabaseError::ConnectionPool(msg) => write!(f, "Database connection error: {}", msg),
            DatabaseError::UnexpectedError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl StdError for DatabaseError {}

/// Central error type that all handler failures map to
#[derive(Debug)]
pub enum ApiError {
    /// Bad login credentials (unknown email or wrong password)
    Authentication,
    /// Token failed signature, parsing, or expiry checks
    InvalidToken,
    /// Refresh token has no live persisted record
    ExpiredOrUnknownToken,
    Validation(ValidationError),
    Database(DatabaseError),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Authentication => write!(f, "Incorrect email or password"),
            ApiError::InvalidToken => write!(f, "Invalid refresh token"),
            ApiError::ExpiredOrUnknownToken => write!(f, "Refresh token expired or not found"),
            ApiError::Validation(e) => write!(f, "{}", e),
            ApiError::Database(e) => write!(f, "{}", e),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl StdError for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Database(err)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        let error_msg = err.to_string();

        if error_msg.contains("no rows") {
            ApiError::Database(DatabaseError::NotFound("Record not found".to_string()))
        } else if error_msg.contains("pool") || error_msg.contains("connect") {
            ApiError::Database(DatabaseError::ConnectionPool(error_msg))
        } else {
            ApiError::Database(DatabaseError::UnexpectedError(error_msg))
        }
    }
}

/// JSON body returned for every error response
#[derive(Debug, serde::Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::Authentication => "AUTHENTICATION_FAILED",
            ApiError::InvalidToken => "TOKEN_INVALID",
            ApiError::ExpiredOrUnknownToken => "TOKEN_EXPIRED_OR_UNKNOWN",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Database(_) => "STORE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn log(&self) {
        match self {
            ApiError::Authentication => {
                tracing::warn!(error = %self, "Invalid credentials attempt");
            }
            ApiError::InvalidToken | ApiError::ExpiredOrUnknownToken => {
                tracing::warn!(error = %self, "Token rejected");
            }
            ApiError::Validation(e) => {
                tracing::warn!(error = %e, "Validation error");
            }
            ApiError::Database(e) => {
                tracing::error!(error = %e, "Database error");
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Authentication
            | ApiError::InvalidToken
            | ApiError::ExpiredOrUnknownToken => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.log();

        let mut builder = HttpResponse::build(self.status_code());
        // Bearer hint on credential failures (login)
        if matches!(self, ApiError::Authentication) {
            builder.insert_header(("WWW-Authenticate", "Bearer"));
        }

        builder.json(ErrorBody {
            error: self.to_string(),
            code: self.code(),
        })
    }
}

/// Error context for request-scoped logging
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub request_id: String,
    pub operation: String,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            operation: operation.into(),
        }
    }
}
