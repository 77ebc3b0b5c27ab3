//! Resource CRUD routes. Handlers resolve the kind from the path segment, so one route set
//! serves every registered kind.

use crate::handlers::resource::{create, delete as delete_handler, list, update};
use crate::handlers::upload::upload_image;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/:path_segment", get(list).post(create))
        .route("/:path_segment/:id", put(update).delete(delete_handler))
        .with_state(state)
}

/// POST /upload with the configured body limit.
pub fn upload_routes(state: AppState) -> Router {
    let limit = state.settings.max_upload_bytes;
    Router::new()
        .route("/upload", post(upload_image))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}
