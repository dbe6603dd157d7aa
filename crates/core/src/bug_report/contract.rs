//! Whole-record validation for creating and updating bug reports.
//!
//! Both paths are all-or-nothing: either every submitted field is valid and a
//! complete [`BugRecord`] comes back, or nothing is applied and the caller
//! gets a [`Rejection`] with every failure in field order
//! (title, description, status, priority, reportedBy).

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::fields::{
    normalize_description, normalize_priority, normalize_reporter, normalize_status,
    normalize_title,
};
use super::{
    BugRecord, BugStatus, FieldError, FieldErrorCode, FIELD_CREATED_AT, FIELD_DESCRIPTION,
    FIELD_ID, FIELD_PRIORITY, FIELD_REPORTED_BY, FIELD_STATUS, FIELD_TITLE,
};

/// A submitted JSON object: every key is optional.
pub type Submission = serde_json::Map<String, Value>;

/// Fields fixed at creation. Any of these in an update patch is rejected.
pub const IMMUTABLE_FIELDS: [&str; 3] = [FIELD_ID, FIELD_CREATED_AT, FIELD_REPORTED_BY];

// ---------------------------------------------------------------------------
// Rejection
// ---------------------------------------------------------------------------

/// A submission that failed one or more field checks.
///
/// Always non-empty. At most one error per field: the first rule it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rejection {
    errors: Vec<FieldError>,
}

impl Rejection {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The user-facing messages, in evaluation order.
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn has_code(&self, code: FieldErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    fn from_errors(errors: Vec<FieldError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self { errors })
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for Rejection {}

impl From<FieldError> for Rejection {
    fn from(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Validate a full submission for a new bug report.
///
/// On success the record has trimmed text fields, `status` defaulted to
/// `open` and `priority` defaulted to `medium`. `id` and `createdAt` keys, if
/// submitted, are never read.
pub fn validate_for_create(submission: &Submission) -> Result<BugRecord, Rejection> {
    let title = normalize_title(submission.get(FIELD_TITLE));
    let description = normalize_description(submission.get(FIELD_DESCRIPTION));
    let status = normalize_status(submission.get(FIELD_STATUS));
    let priority = normalize_priority(submission.get(FIELD_PRIORITY));
    let reported_by = normalize_reporter(submission.get(FIELD_REPORTED_BY));

    match (title, description, status, priority, reported_by) {
        (Ok(title), Ok(description), Ok(status), Ok(priority), Ok(reported_by)) => Ok(BugRecord {
            title,
            description,
            status: status.unwrap_or_default(),
            priority: priority.unwrap_or_default(),
            reported_by,
        }),
        (title, description, status, priority, reported_by) => {
            // At least one of these is an error, or the arm above would match.
            let errors = [
                title.err(),
                description.err(),
                status.err(),
                priority.err(),
                reported_by.err(),
            ]
            .into_iter()
            .flatten()
            .collect();
            Err(Rejection { errors })
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Validate a partial update against the current record.
///
/// Only keys present in `patch` are checked and applied; everything else is
/// carried over from `existing`. A `status` or `priority` of `null` or `""`
/// leaves the field as it is. Unknown keys are ignored.
pub fn validate_for_update(
    existing: &BugRecord,
    patch: &Submission,
) -> Result<BugRecord, Rejection> {
    let mut errors: Vec<FieldError> = IMMUTABLE_FIELDS
        .into_iter()
        .filter(|field| patch.contains_key(*field))
        .map(FieldError::immutable)
        .collect();

    let mut updated = existing.clone();

    if let Some(value) = patch.get(FIELD_TITLE) {
        match normalize_title(Some(value)) {
            Ok(title) => updated.title = title,
            Err(e) => errors.push(e),
        }
    }

    if let Some(value) = patch.get(FIELD_DESCRIPTION) {
        match normalize_description(Some(value)) {
            Ok(description) => updated.description = description,
            Err(e) => errors.push(e),
        }
    }

    match normalize_status(patch.get(FIELD_STATUS)) {
        Ok(Some(next)) => updated.status = next,
        Ok(None) => {}
        Err(e) => errors.push(e),
    }

    match normalize_priority(patch.get(FIELD_PRIORITY)) {
        Ok(Some(priority)) => updated.priority = priority,
        Ok(None) => {}
        Err(e) => errors.push(e),
    }

    Rejection::from_errors(errors).map(|()| updated)
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// Statuses a bug in `from` may move to.
///
/// Every status is reachable from every other, including itself: a bug can
/// be resolved straight from `open` and re-opened after `resolved`.
pub fn valid_transitions(_from: BugStatus) -> &'static [BugStatus] {
    &BugStatus::ALL
}

pub fn can_transition(from: BugStatus, to: BugStatus) -> bool {
    valid_transitions(from).contains(&to)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
