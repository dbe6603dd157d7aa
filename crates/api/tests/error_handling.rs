//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! database is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use bugtrack_api::error::AppError;
use bugtrack_core::bug_report::{self, FieldError, FieldErrorCode, Submission};
use bugtrack_core::error::CoreError;
use http_body_util::BodyExt;
use serde_json::json;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn submission(value: serde_json::Value) -> Submission {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "BugReport",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "BugReport with id 42 not found");
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("Request body must be a JSON object".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "Request body must be a JSON object");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Invalid status value".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Invalid status value");
    assert!(json.get("details").is_none());
}

// ---------------------------------------------------------------------------
// Test: A contract rejection lists every message in order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rejection_returns_400_with_details_and_fields() {
    let rejection = bug_report::validate_for_create(&submission(json!({
        "title": "ab",
        "description": "short",
        "reportedBy": "QA",
    })))
    .unwrap_err();

    let (status, json) = error_to_response(rejection.into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Validation failed");
    assert_eq!(
        json["details"],
        json!([
            "Title must be at least 3 characters",
            "Description must be at least 10 characters",
        ])
    );
    assert_eq!(json["fields"][0]["field"], "title");
    assert_eq!(json["fields"][0]["code"], "TOO_SHORT");
    assert_eq!(json["fields"][1]["field"], "description");
}

// ---------------------------------------------------------------------------
// Test: A single FieldError converts into a one-entry rejection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn field_error_converts_to_rejection_response() {
    let err: AppError =
        FieldError::new("status", FieldErrorCode::Required, "Status is required").into();

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["details"], json!(["Status is required"]));
    assert_eq!(json["fields"][0]["code"], "REQUIRED");
}

// ---------------------------------------------------------------------------
// Test: Internal errors are sanitized
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");

    let body_text = json.to_string();
    assert!(
        !body_text.contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn core_internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::Core(CoreError::Internal("stored status 'archived'".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: sqlx::Error::RowNotFound maps to 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sqlx_row_not_found_returns_404() {
    let err = AppError::Database(sqlx::Error::RowNotFound);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}
