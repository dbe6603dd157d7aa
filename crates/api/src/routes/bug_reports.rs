//! Route definitions for bug reports.
//!
//! Mounted at `/bugs` by `api_routes()`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::bug_reports;
use crate::state::AppState;

/// Bug report routes.
///
/// ```text
/// GET    /                  -> list_bug_reports
/// POST   /                  -> create_bug_report
/// GET    /{id}              -> get_bug_report
/// PUT    /{id}              -> update_bug_report
/// DELETE /{id}              -> delete_bug_report
/// PUT    /{id}/status       -> update_bug_report_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(bug_reports::list_bug_reports).post(bug_reports::create_bug_report),
        )
        .route(
            "/{id}",
            get(bug_reports::get_bug_report)
                .put(bug_reports::update_bug_report)
                .delete(bug_reports::delete_bug_report),
        )
        .route("/{id}/status", put(bug_reports::update_bug_report_status))
}
