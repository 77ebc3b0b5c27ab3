//! Shared application state for all routes. Built once at startup and passed to the router.

use crate::config::Registry;
use crate::settings::Settings;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub registry: Arc<Registry>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(pool: SqlitePool, registry: Registry, settings: Settings) -> Self {
        AppState {
            pool,
            registry: Arc::new(registry),
            settings: Arc::new(settings),
        }
    }
}
