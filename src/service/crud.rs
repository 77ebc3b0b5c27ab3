//! Generic CRUD execution against SQLite, driven by a `ResourceKind` descriptor.
//!
//! Every operation is a single statement, except `delete` on a guarded kind, which counts
//! dependents first. The count and the delete are not atomic: a dependent inserted between
//! them is not detected.

use crate::codec;
use crate::config::{ListFilter, ResourceKind};
use crate::error::AppError;
use crate::sql::{count_where, delete, insert, select_list, update, QueryBuf};
use serde_json::{Map, Value};
use sqlx::sqlite::{SqlitePool, SqliteQueryResult, SqliteRow};
use sqlx::{Row, TypeInfo, ValueRef};
use std::collections::HashMap;

pub struct CrudService;

impl CrudService {
    /// All rows of a kind in its fixed order, decoded for the wire.
    /// `params` are query-string values; only the filters the kind declares are honoured.
    pub async fn list(
        pool: &SqlitePool,
        kind: &ResourceKind,
        params: &HashMap<String, String>,
    ) -> Result<Vec<Value>, AppError> {
        let filters = resolve_filters(kind, params);
        let q = select_list(kind, &filters);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let rows = query.fetch_all(pool).await?;

        let mut out = Vec::with_capacity(rows.len() + 1);
        if let Some(head) = &kind.synthetic_head {
            out.push(head.to_value());
        }
        for row in &rows {
            let stored = row_to_map(kind, row)?;
            out.push(codec::decode_row(kind, &stored));
        }
        Ok(out)
    }

    /// Insert one row and return its identifier.
    pub async fn create(
        pool: &SqlitePool,
        kind: &ResourceKind,
        body: &Map<String, Value>,
    ) -> Result<Value, AppError> {
        let id = codec::id_for_create(kind, body)?;
        if let (Some(head), Some(id)) = (&kind.synthetic_head, &id) {
            if head.id_value(kind.id_wire).as_ref() == Some(id) {
                return Err(AppError::BadRequest(format!(
                    "{} '{}' is reserved",
                    kind.id_wire,
                    id_text(id)
                )));
            }
        }
        let values = encode_writable(kind, body);
        let q = insert(kind, id.as_ref(), &values);
        let result = Self::execute(pool, &q).await?;
        let id = id.unwrap_or_else(|| Value::Number(result.last_insert_rowid().into()));
        tracing::info!(kind = kind.name, id = %id, "created");
        Ok(id)
    }

    /// Replace every writable field of the row. Missing fields take their defaults.
    pub async fn update(
        pool: &SqlitePool,
        kind: &ResourceKind,
        id: &Value,
        body: &Map<String, Value>,
    ) -> Result<(), AppError> {
        let values = encode_writable(kind, body);
        let q = update(kind, id, &values);
        let result = Self::execute(pool, &q).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(kind.name.to_string()));
        }
        Ok(())
    }

    /// Remove the row. Refused with `HasDependents` while another table still references it.
    pub async fn delete(pool: &SqlitePool, kind: &ResourceKind, id: &Value) -> Result<(), AppError> {
        for dep in kind.dependents {
            let count = Self::count(pool, &count_where(dep.table, dep.column, id)).await?;
            if count > 0 {
                tracing::warn!(kind = kind.name, id = %id, table = dep.table, count, "delete refused: dependents exist");
                return Err(AppError::HasDependents {
                    kind: kind.name,
                    id: id_text(id),
                    table: dep.table,
                    count,
                });
            }
        }
        let result = Self::execute(pool, &delete(kind, id)).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(kind.name.to_string()));
        }
        tracing::info!(kind = kind.name, id = %id, "deleted");
        Ok(())
    }

    async fn execute(pool: &SqlitePool, q: &QueryBuf) -> Result<SqliteQueryResult, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.execute(pool).await?)
    }

    async fn count(pool: &SqlitePool, q: &QueryBuf) -> Result<i64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_scalar::<_, i64>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_one(pool).await?)
    }
}

/// Encoded (column, stored value) for every writable field.
fn encode_writable<'k>(kind: &'k ResourceKind, body: &Map<String, Value>) -> Vec<(&'k str, Value)> {
    kind.fields
        .iter()
        .map(|f| (f.column, codec::encode_field(f, codec::lookup(body, f))))
        .collect()
}

fn resolve_filters<'k>(kind: &'k ResourceKind, params: &HashMap<String, String>) -> Vec<(&'k str, Value)> {
    let mut out = Vec::new();
    for filter in kind.filters {
        match *filter {
            ListFilter::Equals { param, column, wildcard } => {
                if let Some(v) = params.get(param).map(|s| s.trim()) {
                    if !v.is_empty() && v != wildcard {
                        out.push((column, Value::String(v.to_string())));
                    }
                }
            }
            ListFilter::ActiveOnly { param, column } => {
                let on = params
                    .get(param)
                    .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1"))
                    .unwrap_or(false);
                if on {
                    out.push((column, Value::Number(1.into())));
                }
            }
        }
    }
    out
}

/// Stored row keyed by column name. Each cell is read by the storage class SQLite holds it in,
/// so a value keeps its written form whatever the column's declared type.
fn row_to_map(kind: &ResourceKind, row: &SqliteRow) -> Result<Map<String, Value>, AppError> {
    let mut map = Map::new();
    map.insert(kind.id_column.to_string(), cell(row, 0)?);
    for (i, f) in kind.fields.iter().enumerate() {
        map.insert(f.column.to_string(), cell(row, i + 1)?);
    }
    Ok(map)
}

fn cell(row: &SqliteRow, idx: usize) -> Result<Value, AppError> {
    let raw = row.try_get_raw(idx)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let v = match raw.type_info().name() {
        "INTEGER" => Value::from(row.try_get_unchecked::<i64, _>(idx)?),
        "REAL" => codec::number_from_f64(row.try_get_unchecked::<f64, _>(idx)?),
        _ => Value::from(row.try_get_unchecked::<String, _>(idx)?),
    };
    Ok(v)
}

fn id_text(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
