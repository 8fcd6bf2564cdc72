//! HTTP routes for the token service.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::crypto::GrantSigner;
use crate::handlers;
use crate::middleware::http_metrics_middleware;
use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Config,

    /// Signs validated grants.
    pub signer: Arc<dyn GrantSigner>,
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `POST /token` - Issue a room grant (405 for any other verb)
/// - `GET /health` - Liveness probe
/// - `GET /` - Service description
/// - `GET /metrics` - Prometheus metrics endpoint
/// - CORS for any origin (OPTIONS answered with 200 on every path)
/// - TraceLayer for request logging
/// - HTTP metrics middleware
/// - 30 second request timeout
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let api_routes = Router::new()
        .route(
            "/token",
            post(handlers::handle_issue_token).fallback(handlers::method_not_allowed),
        )
        .route("/health", get(handlers::health_check))
        .route("/", get(handlers::service_info))
        .with_state(state);

    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer (innermost)
    // 2. TraceLayer
    // 3. CorsLayer - errors and preflights both carry CORS headers
    // 4. http_metrics_middleware (outermost)
    api_routes
        .merge(metrics_routes)
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .layer(middleware::from_fn(http_metrics_middleware))
}

/// Any origin; browsers may only send `Content-Type` and the verbs we serve.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
