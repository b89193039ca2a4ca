//! Operational HTTP endpoints.
//!
//! - `/metrics`     : Prometheus text format
//! - `/api/metrics` : alias of `/metrics`
//! - fallback       : JSON 404

use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use promdemo_core::error::PromDemoError;

use crate::api::error::ApiError;
use crate::app_state::AppState;

pub const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)],
        body,
    )
        .into_response()
}

pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError(PromDemoError::NotFound(format!("Cannot {} {}", method, uri.path())))
}
