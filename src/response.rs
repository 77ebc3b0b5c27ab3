//! Response body helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

/// Body of a successful create, update, or delete.
#[derive(Serialize)]
pub struct MutationBody {
    pub message: String,
    pub id: Value,
}

#[derive(Serialize)]
pub struct UploadBody {
    pub path: String,
}

/// 200 with the decoded rows as a bare JSON array.
pub fn listed(rows: Vec<Value>) -> (StatusCode, Json<Vec<Value>>) {
    (StatusCode::OK, Json(rows))
}

pub fn created(kind_name: &str, id: Value) -> (StatusCode, Json<MutationBody>) {
    mutation(StatusCode::CREATED, kind_name, "created", id)
}

pub fn updated(kind_name: &str, id: Value) -> (StatusCode, Json<MutationBody>) {
    mutation(StatusCode::OK, kind_name, "updated", id)
}

pub fn deleted(kind_name: &str, id: Value) -> (StatusCode, Json<MutationBody>) {
    mutation(StatusCode::OK, kind_name, "deleted", id)
}

fn mutation(status: StatusCode, kind_name: &str, verb: &str, id: Value) -> (StatusCode, Json<MutationBody>) {
    (
        status,
        Json(MutationBody {
            message: format!("{} {}", kind_name, verb),
            id,
        }),
    )
}

pub fn uploaded(path: String) -> (StatusCode, Json<UploadBody>) {
    (StatusCode::CREATED, Json(UploadBody { path }))
}
