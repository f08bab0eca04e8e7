use axum::extract::State;
use axum::http::StatusCode;

use crate::services::ServingStatus;
use crate::AppState;

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.health.check().await {
        ServingStatus::Serving => (StatusCode::OK, "OK"),
        ServingStatus::NotServing => (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE"),
    }
}
