#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use bugtrack_api::config::ServerConfig;
use bugtrack_api::router::build_app_router;
use bugtrack_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// The database URL is never read: tests hand the router a pool that
/// `#[sqlx::test]` already created.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: "postgres://unused".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
    }
}

/// Build the full application router, middleware included, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::POST, uri, body.to_string()).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::PUT, uri, body.to_string()).await
}

/// Send a raw string body with a JSON content type, for malformed payloads.
pub async fn json_request(app: Router, method: Method, uri: &str, body: String) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a valid bug report through the API and return its `data` object.
pub async fn create_bug(pool: &PgPool, title: &str) -> serde_json::Value {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/bugs",
        serde_json::json!({
            "title": title,
            "description": "Crashes when the form is submitted twice",
            "reportedBy": "Tester",
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
