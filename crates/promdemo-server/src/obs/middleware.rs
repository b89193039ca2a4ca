//! Request metrics middleware.
//!
//! Wraps every request: captures method and raw path, runs the inner
//! service, then fires the completion hook exactly once with the final
//! status and elapsed wall-clock time. If the request future is dropped
//! before a response exists, nothing is recorded.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

pub async fn track_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().as_str().to_owned();
    let path = request.uri().path().to_owned();

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let status = response.status().as_u16();
    state.metrics().record_request(&method, &path, status, elapsed_ms);
    tracing::debug!(%method, %path, status, elapsed_ms, "request recorded");

    response
}
