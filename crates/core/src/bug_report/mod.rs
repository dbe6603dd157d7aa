//! Bug report domain types and validation contract.
//!
//! - [`fields`]: one pure validator per submitted field.
//! - [`contract`]: whole-record validation for the create and update paths,
//!   plus the status transition policy.
//!
//! Nothing here performs I/O. Callers hand in the raw JSON object they
//! received and get back either a normalized [`BugRecord`] or a
//! [`Rejection`] listing every failing field.

pub mod contract;
pub mod fields;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use contract::{
    can_transition, valid_transitions, validate_for_create, validate_for_update, Rejection,
    Submission, IMMUTABLE_FIELDS,
};
pub use fields::{
    validate_description, validate_priority, validate_reporter, validate_status, validate_title,
    FieldResult,
};

// ---------------------------------------------------------------------------
// Wire field names
// ---------------------------------------------------------------------------

pub const FIELD_ID: &str = "id";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_PRIORITY: &str = "priority";
pub const FIELD_REPORTED_BY: &str = "reportedBy";
pub const FIELD_CREATED_AT: &str = "createdAt";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Workflow stage of a bug report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BugStatus {
    /// Initial status when none is submitted.
    #[default]
    Open,
    InProgress,
    Resolved,
}

impl BugStatus {
    /// All statuses, in workflow order.
    pub const ALL: [BugStatus; 3] = [BugStatus::Open, BugStatus::InProgress, BugStatus::Resolved];

    pub fn as_str(self) -> &'static str {
        match self {
            BugStatus::Open => "open",
            BugStatus::InProgress => "in-progress",
            BugStatus::Resolved => "resolved",
        }
    }

    /// Parse a wire name. Matching is exact: `"Open"` is not a status.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for BugStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Urgency classification of a bug report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BugPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl BugPriority {
    /// All priorities, lowest first.
    pub const ALL: [BugPriority; 4] = [
        BugPriority::Low,
        BugPriority::Medium,
        BugPriority::High,
        BugPriority::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BugPriority::Low => "low",
            BugPriority::Medium => "medium",
            BugPriority::High => "high",
            BugPriority::Critical => "critical",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for BugPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Accepted record
// ---------------------------------------------------------------------------

/// The caller-controlled content of a bug report after validation.
///
/// Storage-assigned attributes (`id`, `createdAt`) are deliberately absent:
/// the contract never produces or changes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BugRecord {
    pub title: String,
    pub description: String,
    pub status: BugStatus,
    pub priority: BugPriority,
    pub reported_by: String,
}

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// Which rule a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldErrorCode {
    /// Mandatory field missing, blank, or not text.
    Required,
    TooShort,
    TooLong,
    /// Value outside the allowed status or priority set.
    InvalidEnum,
    /// Update attempted to change a field fixed at creation.
    ImmutableField,
}

impl FieldErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldErrorCode::Required => "REQUIRED",
            FieldErrorCode::TooShort => "TOO_SHORT",
            FieldErrorCode::TooLong => "TOO_LONG",
            FieldErrorCode::InvalidEnum => "INVALID_ENUM",
            FieldErrorCode::ImmutableField => "IMMUTABLE_FIELD",
        }
    }
}

/// A single failed field check, with the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub code: FieldErrorCode,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, code: FieldErrorCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }

    pub(crate) fn immutable(field: &'static str) -> Self {
        Self::new(
            field,
            FieldErrorCode::ImmutableField,
            format!("Field '{field}' cannot be changed after creation"),
        )
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FieldError {}
