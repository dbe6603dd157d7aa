//! Request body extractors.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use bugtrack_core::bug_report::Submission;
use bugtrack_core::types::DbId;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;

/// A JSON request body that must be an object.
///
/// The contract classifies every field itself, so the body is taken as a
/// raw map rather than a typed DTO: a wrong-typed field is a validation
/// message, not a deserialization failure. Malformed JSON or a non-object
/// body is a 400 `BAD_REQUEST`.
#[derive(Debug)]
pub struct JsonObject(pub Submission);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        match value {
            Value::Object(map) => Ok(JsonObject(map)),
            _ => Err(AppError::BadRequest(
                "Request body must be a JSON object".into(),
            )),
        }
    }
}

/// A numeric `{id}` path segment.
///
/// Anything that does not parse as an id is a 400 `BAD_REQUEST` with the
/// usual JSON error body.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub DbId);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "Rejected path parameter");
                AppError::BadRequest("Invalid ID format".into())
            })?;

        Ok(IdPath(id))
    }
}

/// Query string deserialized into `T`, with JSON errors on failure.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(QueryParams(params))
    }
}
