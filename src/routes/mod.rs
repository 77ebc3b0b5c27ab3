//! Router assembly: common routes at the root, resource and upload routes under `/api`,
//! uploaded files under `/uploads`.

mod common;
mod resource;

pub use common::common_routes;
pub use resource::{resource_routes, upload_routes};

use crate::error::ConfigError;
use crate::settings::Settings;
use crate::state::AppState;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Full application router with CORS and request tracing. Used by the binary and by tests.
pub fn app_router(state: AppState) -> Result<Router, ConfigError> {
    let cors = build_cors_layer(&state.settings)?;
    let uploads = ServeDir::new(&state.settings.uploads_dir);

    // Upload is merged first so `/api/upload` wins over `/api/:path_segment`.
    let api = Router::new()
        .merge(upload_routes(state.clone()))
        .merge(resource_routes(state.clone()));

    Ok(Router::new()
        .merge(common_routes(state))
        .nest("/api", api)
        .nest_service("/uploads", uploads)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors))
}

/// `*` allows any origin; anything else must parse as a single header value.
pub fn build_cors_layer(settings: &Settings) -> Result<CorsLayer, ConfigError> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);
    let origin = settings.cors_origin.trim();
    if origin == "*" {
        return Ok(layer.allow_origin(Any));
    }
    let value = HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidValue {
        key: "CORS_ORIGIN",
        value: origin.to_string(),
    })?;
    Ok(layer.allow_origin(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_and_single_origins_are_accepted() {
        let mut settings = Settings::default();
        assert!(build_cors_layer(&settings).is_ok());
        settings.cors_origin = "https://example.org".into();
        assert!(build_cors_layer(&settings).is_ok());
    }

    #[test]
    fn unparseable_origin_is_a_config_error() {
        let settings = Settings {
            cors_origin: "bad\norigin".into(),
            ..Settings::default()
        };
        let err = build_cors_layer(&settings).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "CORS_ORIGIN", .. }));
    }
}
