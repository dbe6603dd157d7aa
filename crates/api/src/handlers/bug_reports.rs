//! Handlers for bug reports.
//!
//! Every write goes through the validation contract in
//! `bugtrack_core::bug_report` before touching storage; a rejected
//! submission never reaches the database.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bugtrack_core::bug_report::{
    self, fields, BugPriority, BugStatus, FieldError, FieldErrorCode, Submission, FIELD_STATUS,
};
use bugtrack_core::error::CoreError;
use bugtrack_core::search::{clamp_limit, clamp_offset};
use bugtrack_core::types::DbId;
use bugtrack_db::models::bug_report::{BugReport, BugReportListParams};
use bugtrack_db::repositories::BugReportRepo;
use bugtrack_db::DbPool;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, JsonObject, QueryParams};
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: i64 = 50;
const MAX_LIST_LIMIT: i64 = 200;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "BugReport",
        id,
    })
}

async fn find_or_404(pool: &DbPool, id: DbId) -> AppResult<BugReport> {
    BugReportRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

// ---------------------------------------------------------------------------
// GET /bugs
// ---------------------------------------------------------------------------

/// List bug reports, newest first, with optional status and priority filters.
pub async fn list_bug_reports(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<BugReportListParams>,
) -> AppResult<impl IntoResponse> {
    let status = status_filter(params.status.as_deref())?;
    let priority = priority_filter(params.priority.as_deref())?;

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let reports =
        BugReportRepo::list_filtered(&state.pool, status, priority, limit, offset).await?;

    Ok(Json(DataResponse { data: reports }))
}

/// Filters reuse the field validators, so an empty value means "no filter"
/// and an unknown one gets the same message a submission would.
fn status_filter(raw: Option<&str>) -> AppResult<Option<BugStatus>> {
    let value = raw.map(|s| Value::String(s.to_owned()));
    fields::normalize_status(value.as_ref())
        .map_err(|e| AppError::Core(CoreError::Validation(e.message)))
}

fn priority_filter(raw: Option<&str>) -> AppResult<Option<BugPriority>> {
    let value = raw.map(|s| Value::String(s.to_owned()));
    fields::normalize_priority(value.as_ref())
        .map_err(|e| AppError::Core(CoreError::Validation(e.message)))
}

// ---------------------------------------------------------------------------
// GET /bugs/{id}
// ---------------------------------------------------------------------------

/// Get a single bug report by ID.
pub async fn get_bug_report(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<impl IntoResponse> {
    let report = find_or_404(&state.pool, id).await?;

    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// POST /bugs
// ---------------------------------------------------------------------------

/// Submit a new bug report.
///
/// Responds 201 with the stored row, including its storage-assigned `id`
/// and `createdAt`, or 400 with every failing field.
pub async fn create_bug_report(
    State(state): State<AppState>,
    JsonObject(submission): JsonObject,
) -> AppResult<impl IntoResponse> {
    let record = bug_report::validate_for_create(&submission)?;

    let report = BugReportRepo::create(&state.pool, &record).await?;

    tracing::info!(
        bug_report_id = report.id,
        status = %record.status,
        priority = %record.priority,
        "Bug report created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}

// ---------------------------------------------------------------------------
// PUT /bugs/{id}
// ---------------------------------------------------------------------------

/// Partially update a bug report.
///
/// Only `title`, `description`, `status` and `priority` may change. The
/// patch is validated against the stored record and applied all-or-nothing.
pub async fn update_bug_report(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonObject(patch): JsonObject,
) -> AppResult<impl IntoResponse> {
    let current = find_or_404(&state.pool, id).await?;
    let record = bug_report::validate_for_update(&current.record()?, &patch)?;

    let updated = BugReportRepo::update(&state.pool, id, &record)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        bug_report_id = id,
        fields = ?patch.keys().collect::<Vec<_>>(),
        "Bug report updated",
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// PUT /bugs/{id}/status
// ---------------------------------------------------------------------------

/// Move a bug report to another status.
///
/// Body: `{ "status": "<status>" }`. Unlike the general update, the status
/// is required here. Other keys in the body are ignored.
pub async fn update_bug_report_status(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonObject(body): JsonObject,
) -> AppResult<impl IntoResponse> {
    let status = body.get(FIELD_STATUS).cloned().unwrap_or(Value::Null);
    if fields::normalize_status(Some(&status))?.is_none() {
        return Err(
            FieldError::new(FIELD_STATUS, FieldErrorCode::Required, "Status is required").into(),
        );
    }

    let current = find_or_404(&state.pool, id).await?;
    let from = current.record()?;

    let mut patch = Submission::new();
    patch.insert(FIELD_STATUS.to_owned(), status);
    let record = bug_report::validate_for_update(&from, &patch)?;

    let updated = BugReportRepo::update(&state.pool, id, &record)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        bug_report_id = id,
        from = %from.status,
        to = %record.status,
        "Bug report status updated",
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /bugs/{id}
// ---------------------------------------------------------------------------

/// Delete a bug report. No precondition beyond existence.
pub async fn delete_bug_report(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<impl IntoResponse> {
    let deleted = BugReportRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(not_found(id));
    }

    tracing::info!(bug_report_id = id, "Bug report deleted");

    Ok(StatusCode::NO_CONTENT)
}
