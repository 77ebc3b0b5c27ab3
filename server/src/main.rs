//! Site admin server: loads settings from the environment (and `.env`), opens the SQLite
//! database, creates missing tables, and serves the admin API.
//!
//! Run from repo root: `cargo run -p site-admin-server`

use site_admin::{app_router, connect, ensure_tables, AppState, Registry, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("site_admin=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let registry = Registry::standard()?;
    let pool = connect(&settings.db_path).await?;
    ensure_tables(&pool, &registry).await?;
    tokio::fs::create_dir_all(settings.project_uploads_dir()).await?;

    let addr = settings.bind_addr();
    let state = AppState::new(pool, registry, settings);
    let app = app_router(state)?;

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
