//! Process configuration from the environment (`.env` is loaded by the binary via dotenvy).

use crate::error::ConfigError;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// SQLite file path, or `:memory:`.
    pub db_path: String,
    /// Root of uploaded files; served under `/uploads`.
    pub uploads_dir: PathBuf,
    /// Allowed CORS origin; `*` allows any.
    pub cors_origin: String,
    pub max_upload_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: "0.0.0.0".into(),
            port: DEFAULT_PORT,
            db_path: "projects.db".into(),
            uploads_dir: PathBuf::from("uploads"),
            cors_origin: "*".into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Settings {
    /// Read settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup. Unset or empty variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut s = Settings::default();
        if let Some(v) = get("HOST") {
            s.host = v;
        }
        if let Some(v) = get("PORT").or_else(|| get("SERVER_PORT")) {
            s.port = v
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value: v })?;
        }
        if let Some(v) = get("DB_PATH") {
            s.db_path = v;
        }
        if let Some(v) = get("UPLOADS_DIR") {
            s.uploads_dir = PathBuf::from(v);
        }
        if let Some(v) = get("CORS_ORIGIN") {
            s.cors_origin = v;
        }
        if let Some(v) = get("MAX_UPLOAD_BYTES") {
            s.max_upload_bytes = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "MAX_UPLOAD_BYTES",
                value: v,
            })?;
        }
        Ok(s)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Directory image uploads are written to.
    pub fn project_uploads_dir(&self) -> PathBuf {
        self.uploads_dir.join("projects")
    }
}
