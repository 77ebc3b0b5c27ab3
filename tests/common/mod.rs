#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use site_admin::{app_router, connect, ensure_tables, AppState, Registry, Settings};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

/// Fresh in-memory database with every table created.
pub async fn test_pool() -> SqlitePool {
    let pool = connect(":memory:").await.unwrap();
    let registry = Registry::standard().unwrap();
    ensure_tables(&pool, &registry).await.unwrap();
    pool
}

/// Full application router over a fresh database. Uploads go to a temporary directory that
/// lives as long as the returned guard.
pub async fn build_test_app() -> (Router, SqlitePool, TempDir) {
    let pool = test_pool().await;
    let uploads = tempfile::tempdir().unwrap();
    let settings = Settings {
        uploads_dir: uploads.path().to_path_buf(),
        max_upload_bytes: 1024,
        ..Settings::default()
    };
    let state = AppState::new(pool.clone(), Registry::standard().unwrap(), settings);
    (app_router(state).unwrap(), pool, uploads)
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Multipart body with a single file field.
pub fn multipart_request(uri: &str, field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let boundary = "site-admin-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n").as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
