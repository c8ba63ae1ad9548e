use axum::{Json, extract::State, http::Uri};
use std::sync::Arc;

use super::{ApiError, AppState, HealthResponse};

/// `GET /api/health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found("Route", uri.path())
}
