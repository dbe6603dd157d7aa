use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bugtrack_core::bug_report::{FieldError, Rejection};
use bugtrack_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `bugtrack_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<Rejection> for AppError {
    fn from(rejection: Rejection) -> Self {
        AppError::Core(CoreError::Rejected(rejection))
    }
}

impl From<FieldError> for AppError {
    fn from(error: FieldError) -> Self {
        Rejection::from(error).into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                // Contract rejections carry per-field detail on top of the usual body.
                CoreError::Rejected(rejection) => return rejection_response(rejection),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 400 body for a contract rejection.
///
/// `details` lists the messages verbatim in evaluation order; `fields` adds
/// the field name and rule code for each.
fn rejection_response(rejection: &Rejection) -> Response {
    tracing::debug!(errors = %rejection, "Submission rejected");

    let body = json!({
        "error": "Validation failed",
        "code": "VALIDATION_ERROR",
        "details": rejection.messages(),
        "fields": rejection,
    });

    (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Check constraint violations (`23514`) map to 400; the contract should
///   have caught these, so they are logged as warnings.
/// - Text Postgres cannot store (`22021`, `22P05`), such as an embedded NUL,
///   maps to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23514") => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            tracing::warn!(constraint, "Check constraint rejected a write");
            (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Value violates constraint: {constraint}"),
            )
        }
        sqlx::Error::Database(db_err)
            if matches!(db_err.code().as_deref(), Some("22021" | "22P05")) =>
        {
            tracing::warn!(error = %db_err, "Unstorable text rejected by the database");
            (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Text fields must not contain NUL or other unsupported characters".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
