//! Resource CRUD handlers. The kind is resolved from the first path segment.

use crate::codec::parse_path_id;
use crate::config::ResourceKind;
use crate::error::AppError;
use crate::response::{created, deleted, listed, updated};
use crate::service::CrudService;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{Map, Value};
use std::collections::HashMap;

fn resolve_kind(state: &AppState, path_segment: &str) -> Result<&'static ResourceKind, AppError> {
    state
        .registry
        .kind_by_path(path_segment)
        .ok_or_else(|| AppError::NotFound(format!("resource '{}'", path_segment)))
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let kind = resolve_kind(&state, &path_segment)?;
    let rows = CrudService::list(&state.pool, kind, &params).await?;
    Ok(listed(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let kind = resolve_kind(&state, &path_segment)?;
    let body = body_to_map(body)?;
    let id = CrudService::create(&state.pool, kind, &body).await?;
    Ok(created(kind.name, id))
}

pub async fn update(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let kind = resolve_kind(&state, &path_segment)?;
    let id = parse_path_id(kind, &id_str)?;
    let body = body_to_map(body)?;
    CrudService::update(&state.pool, kind, &id, &body).await?;
    Ok(updated(kind.name, id))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let kind = resolve_kind(&state, &path_segment)?;
    let id = parse_path_id(kind, &id_str)?;
    CrudService::delete(&state.pool, kind, &id).await?;
    Ok(deleted(kind.name, id))
}
