//! SQLite pool construction and readiness probe.

use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

/// In-memory database name accepted in place of a file path.
pub const MEMORY_DB: &str = ":memory:";

/// Open the database file, creating it if missing. `:memory:` opens a private in-memory
/// database on a single connection that is never recycled, so its contents live as long as the pool.
pub async fn connect(db_path: &str) -> Result<SqlitePool, AppError> {
    if db_path == MEMORY_DB {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?;
        return Ok(pool);
    }

    if let Some(parent) = Path::new(db_path).parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let opts = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;
    tracing::info!(path = %db_path, "connected to SQLite");
    Ok(pool)
}

/// True when the database answers a trivial query.
pub async fn ping(pool: &SqlitePool) -> bool {
    sqlx::query("SELECT 1").fetch_optional(pool).await.is_ok()
}
