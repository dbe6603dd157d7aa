//! Shared response envelope types for API handlers.
//!
//! All successful API responses use a `{ "data": ... }` envelope. Errors use
//! `{ "error": ..., "code": ... }` and are produced by
//! [`AppError`](crate::error::AppError).

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
