//! Repository for the `bug_reports` table.

use bugtrack_core::bug_report::{BugPriority, BugRecord, BugStatus};
use bugtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::bug_report::BugReport;

/// Column list for `bug_reports` queries.
const COLUMNS: &str = "\
    id, title, description, status, priority, reported_by, \
    created_at, updated_at";

/// Provides CRUD operations for bug reports.
pub struct BugReportRepo;

impl BugReportRepo {
    /// Insert a validated record, returning the full row with its
    /// storage-assigned `id` and `created_at`.
    pub async fn create(pool: &PgPool, record: &BugRecord) -> Result<BugReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO bug_reports \
                (title, description, status, priority, reported_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BugReport>(&query)
            .bind(&record.title)
            .bind(&record.description)
            .bind(record.status.as_str())
            .bind(record.priority.as_str())
            .bind(&record.reported_by)
            .fetch_one(pool)
            .await
    }

    /// Find a bug report by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BugReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bug_reports WHERE id = $1");
        sqlx::query_as::<_, BugReport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List bug reports with optional status and priority filters.
    ///
    /// Results are ordered newest-first; `id` breaks ties between rows
    /// created in the same transaction.
    pub async fn list_filtered(
        pool: &PgPool,
        status: Option<BugStatus>,
        priority: Option<BugPriority>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BugReport>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if priority.is_some() {
            conditions.push(format!("priority = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM bug_reports {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, BugReport>(&query);

        if let Some(s) = status {
            q = q.bind(s.as_str());
        }
        if let Some(p) = priority {
            q = q.bind(p.as_str());
        }
        q = q.bind(limit).bind(offset);

        q.fetch_all(pool).await
    }

    /// Overwrite the editable columns of a bug report.
    ///
    /// `reported_by`, `id`, and `created_at` are never written. Returns the
    /// updated row if found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        record: &BugRecord,
    ) -> Result<Option<BugReport>, sqlx::Error> {
        let query = format!(
            "UPDATE bug_reports SET \
                 title = $2, \
                 description = $3, \
                 status = $4, \
                 priority = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BugReport>(&query)
            .bind(id)
            .bind(&record.title)
            .bind(&record.description)
            .bind(record.status.as_str())
            .bind(record.priority.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Delete a bug report by ID.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bug_reports WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
