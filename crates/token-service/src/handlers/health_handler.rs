//! Liveness and service description endpoints.

use crate::models::{EndpointInfo, HealthResponse, ServiceInfoResponse};
use crate::routes::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// Liveness probe handler.
///
/// Does not check anything beyond the process answering HTTP; the service
/// has no dependencies to probe.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /
pub async fn service_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfoResponse> {
    let endpoint = |method: &str, path: &str, description: &str| EndpointInfo {
        method: method.to_string(),
        path: path.to_string(),
        description: description.to_string(),
    };

    Json(ServiceInfoResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.as_str().to_string(),
        endpoints: vec![
            endpoint("POST", "/token", "Issue a room access token"),
            endpoint("GET", "/health", "Liveness probe"),
            endpoint("GET", "/metrics", "Prometheus metrics"),
        ],
    })
}
