//! HTTP adapters - axum routers over the application layer.
//!
//! ```text
//! /api/auth/*   sign-in, sign-out, session state
//! /api/screen   rendered UI state
//! /__e2e/*      test hooks (simulated mode only)
//! ```

pub mod auth;
pub mod e2e;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::application::AppShell;
use crate::config::ServerConfig;

/// Builds the full application router.
///
/// The `/__e2e` routes are merged only when the shell exposes test hooks.
pub fn app_router(shell: Arc<AppShell>, server: &ServerConfig) -> Router {
    let mut router = auth::auth_routes(Arc::clone(&shell));

    if let Some(hooks) = shell.e2e_hooks() {
        tracing::warn!("E2E test hooks mounted at /__e2e");
        router = router.nest("/__e2e", e2e::e2e_routes(hooks));
    }

    router
        .layer(cors_layer(server))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
