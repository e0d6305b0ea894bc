//! Shared REST state, error mapping, and operational endpoints.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use pulse_core::types::AttributionModel;
use pulse_core::PulseError;
use pulse_data::DashboardStore;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DashboardStore>,
    /// Applied when a request omits the `model` parameter. A request that
    /// names an unknown model still fails with 400.
    pub default_model: AttributionModel,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<DashboardStore>, default_model: AttributionModel) -> Self {
        Self {
            store,
            default_model,
            start_time: Instant::now(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Maps a domain error onto the HTTP status and wire error code.
pub fn reject(err: PulseError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &err {
        PulseError::UnsupportedModel(_) => (StatusCode::BAD_REQUEST, "unsupported_model"),
        PulseError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
        PulseError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };
    if status == StatusCode::BAD_REQUEST {
        metrics::counter!("api.validation_errors").increment(1);
    }
    warn!(error = %err, code, "request rejected");
    (
        status,
        Json(ErrorResponse {
            error: code.to_string(),
            message: err.to_string(),
        }),
    )
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

/// GET /health — Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — Readiness probe for Kubernetes.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses((status = 200, description = "Ready to accept traffic"))
)]
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    // The store is seeded before the listener binds; an empty channel list
    // means startup has not finished.
    if state.store.list_channels().is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

/// GET /live — Liveness probe for Kubernetes.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses((status = 200, description = "Process is live"))
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
