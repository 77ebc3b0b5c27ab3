//! Site admin: descriptor-driven content backend over SQLite.

pub mod codec;
pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Registry, ResourceKind};
pub use error::{AppError, ConfigError};
pub use migration::ensure_tables;
pub use routes::{app_router, common_routes, resource_routes, upload_routes};
pub use service::CrudService;
pub use settings::Settings;
pub use state::AppState;
pub use store::{connect, ping};
