//! Bug report entity model and query parameters.

use bugtrack_core::bug_report::{BugPriority, BugRecord, BugStatus};
use bugtrack_core::error::CoreError;
use bugtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `bug_reports` table.
///
/// `status` and `priority` are stored as text and guarded by `CHECK`
/// constraints; [`BugReport::record`] lifts them back into the typed enums.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BugReport {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub reported_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BugReport {
    /// The caller-editable content of this row, as the update contract
    /// expects it.
    pub fn record(&self) -> Result<BugRecord, CoreError> {
        let status = BugStatus::parse(&self.status).ok_or_else(|| {
            CoreError::Internal(format!(
                "bug report {} has unknown status '{}'",
                self.id, self.status
            ))
        })?;
        let priority = BugPriority::parse(&self.priority).ok_or_else(|| {
            CoreError::Internal(format!(
                "bug report {} has unknown priority '{}'",
                self.id, self.priority
            ))
        })?;

        Ok(BugRecord {
            title: self.title.clone(),
            description: self.description.clone(),
            status,
            priority,
            reported_by: self.reported_by.clone(),
        })
    }
}

/// Query parameters for listing bug reports.
#[derive(Debug, Default, Deserialize)]
pub struct BugReportListParams {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
