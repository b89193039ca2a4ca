//! Demo REST endpoints.
//!
//! Static or in-memory data only; their job is to generate traffic for the
//! request metrics.

pub mod error;
pub mod slow;
pub mod users;

use axum::{extract::State, response::IntoResponse, Json};
use chrono::SecondsFormat;
use serde_json::json;

use crate::app_state::AppState;

pub use slow::slow_api;
pub use users::{create_user, list_users};

/// Endpoints advertised by `GET /`.
pub const ENDPOINTS: [&str; 7] = [
    "GET /",
    "GET /api/health",
    "GET /api/users",
    "POST /api/users",
    "GET /api/slowAPI",
    "GET /metrics",
    "GET /api/metrics",
];

pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub async fn index() -> impl IntoResponse {
    Json(json!({
        "message": "Welcome to the promdemo server!",
        "timestamp": now_rfc3339(),
        "endpoints": ENDPOINTS,
    }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "uptime": state.metrics().process_uptime_secs(),
        "timestamp": now_rfc3339(),
    }))
}
