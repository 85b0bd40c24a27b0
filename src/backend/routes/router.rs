/**
 * Router Configuration
 *
 * This module assembles the complete Axum router:
 *
 * 1. API routes under `/api/v1` (see [`configure_api_routes`])
 * 2. The built frontend from the static directory, with every unknown
 *    path answered by its `index.html` so client-side routing works
 * 3. CORS for the configured client origin, with credentials, so the
 *    session cookie travels on cross-origin requests
 * 4. Request tracing
 */

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// CORS layer for the client origin, or `None` when the origin is unusable
fn cors_layer(origin: &str) -> Option<CorsLayer> {
    let origin = match origin.parse::<HeaderValue>() {
        Ok(origin) => origin,
        Err(e) => {
            tracing::warn!("Ignoring invalid client origin '{}': {}", origin, e);
            return None;
        }
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
    )
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new(), &app_state);

    let static_dir = app_state.config.static_dir.clone();
    let router = if static_dir.is_dir() {
        tracing::info!("Serving frontend from {}", static_dir.display());
        let index = static_dir.join("index.html");
        router.fallback_service(ServeDir::new(&static_dir).fallback(ServeFile::new(index)))
    } else {
        tracing::warn!(
            "Frontend directory {} does not exist, not serving a frontend",
            static_dir.display()
        );
        router
    };

    let router = match app_state.config.client_origin.as_deref().and_then(cors_layer) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
