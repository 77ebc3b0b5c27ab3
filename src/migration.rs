//! Table DDL generated from the registered descriptors.
//! Every statement is `CREATE TABLE IF NOT EXISTS`, so this runs on every startup.

use crate::config::{IdStrategy, Registry, ResourceKind};
use crate::error::AppError;
use crate::sql::quoted;
use sqlx::SqlitePool;

/// `CREATE TABLE IF NOT EXISTS` for one kind.
pub fn create_table_sql(kind: &ResourceKind) -> String {
    let id_def = match kind.id_strategy {
        IdStrategy::AutoIncrement => "INTEGER PRIMARY KEY AUTOINCREMENT",
        IdStrategy::IntegerOrAuto => "INTEGER PRIMARY KEY",
        IdStrategy::TimeDerived | IdStrategy::CallerOrTimeDerived | IdStrategy::NaturalKey => {
            "TEXT PRIMARY KEY NOT NULL"
        }
    };
    let mut cols = vec![format!("{} {}", quoted(kind.id_column), id_def)];
    for f in kind.fields {
        let not_null = if f.required { " NOT NULL" } else { "" };
        cols.push(format!("{} {}{}", quoted(f.column), f.ty.sql_type(), not_null));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
        quoted(kind.table),
        cols.join(",\n    ")
    )
}

/// Create every registered table that does not exist yet.
pub async fn ensure_tables(pool: &SqlitePool, registry: &Registry) -> Result<(), AppError> {
    for kind in &registry.kinds {
        let ddl = create_table_sql(kind);
        tracing::debug!(sql = %ddl, "ddl");
        sqlx::query(&ddl).execute(pool).await?;
    }
    tracing::info!(tables = registry.kinds.len(), "schema ready");
    Ok(())
}
