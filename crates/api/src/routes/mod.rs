pub mod bug_reports;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                       service and database health
/// /bugs                         list, create
/// /bugs/{id}                    get, update, delete
/// /bugs/{id}/status             change status
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/bugs", bug_reports::router())
}
